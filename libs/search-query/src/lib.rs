//! Backend-neutral search queries for GO ontology and annotation data.
//!
//! Raw request text is turned into a [`Query`] tree by a
//! [`StringToQueryConverter`], wrapped with paging, facets and filters in a
//! [`QueryRequest`], and rendered for a backend by a translator such as
//! [`solr::SolrQueryConverter`].
#![forbid(unsafe_code)]

mod converter;
mod dispatcher;
mod error;
mod params;
mod query;
mod request;
mod searchable;

pub mod solr;

pub use converter::{StringToQueryConverter, FIELD_SEPARATOR};
pub use dispatcher::{
    dispatch, is_valid_facets, is_valid_filter_queries, is_valid_num_rows, is_valid_page,
    is_valid_query, QueryResult, SearchService,
};
pub use error::{Error, Result};
pub use params::{SearchParameters, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use query::{CompositeQuery, FieldQuery, NoFieldQuery, Query, QueryOp, QueryVisitor};
pub use request::{Builder, Facet, Page, QueryRequest};
pub use searchable::{SearchableField, SearchableFields};
