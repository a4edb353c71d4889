//! Solr backend translation
//!
//! [`SolrQuerySerializer`] renders a [`Query`](crate::Query) tree in the Solr
//! standard query syntax; [`SolrQueryConverter`] turns a whole
//! [`QueryRequest`](crate::QueryRequest) into request parameters.

mod converter;
mod escape;
mod serializer;

pub use converter::{SolrParams, SolrQueryConverter, DEFAULT_REQUEST_HANDLER};
pub use escape::escape_query_chars;
pub use serializer::SolrQuerySerializer;

/// Separates a field name from its value in Solr syntax.
pub const SOLR_FIELD_SEPARATOR: char = ':';
