//! Search request value objects
//!
//! A [`QueryRequest`] bundles everything a single search needs: the root
//! query, optional paging, facets, filter queries and the highlighting flag.
//! It is assembled through a [`Builder`] and cannot be changed afterwards.

use crate::error::{Error, Result};
use crate::query::Query;
use serde::Serialize;

/// One-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub fn new(number: u32, size: u32) -> Result<Self> {
        if number == 0 {
            return Err(Error::invalid("Page number must be greater than 0"));
        }
        if size == 0 {
            return Err(Error::invalid("Page size must be greater than 0"));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Zero-based index of the first row on this page.
    pub fn start(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// A field to produce result counts for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Facet {
    field: String,
}

impl Facet {
    pub fn new(field: impl Into<String>) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(Error::invalid("Facet field cannot be empty"));
        }
        Ok(Self { field })
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryRequest {
    query: Query,
    page: Option<Page>,
    facets: Vec<Facet>,
    filters: Vec<Query>,
    highlighting: bool,
}

impl QueryRequest {
    pub fn builder(query: Query) -> Builder {
        Builder::new(query)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Queries the backend ANDs with the root query, in the order added.
    pub fn filters(&self) -> &[Query] {
        &self.filters
    }

    pub fn highlighting(&self) -> bool {
        self.highlighting
    }
}

/// Accumulates the parts of a [`QueryRequest`].
///
/// Scalar settings keep the last value written; facets and filters are
/// appended in call order. Field names are not checked against the
/// searchable fields here, that happens before the builder is involved.
#[derive(Debug, Clone)]
pub struct Builder {
    query: Query,
    page: Option<Page>,
    facets: Vec<Facet>,
    filters: Vec<Query>,
    highlighting: bool,
}

impl Builder {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            page: None,
            facets: Vec::new(),
            filters: Vec::new(),
            highlighting: false,
        }
    }

    pub fn set_page(mut self, number: u32, size: u32) -> Result<Self> {
        self.page = Some(Page::new(number, size)?);
        Ok(self)
    }

    pub fn add_facet(mut self, field: impl Into<String>) -> Result<Self> {
        self.facets.push(Facet::new(field)?);
        Ok(self)
    }

    pub fn add_filter(mut self, filter: Query) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn set_highlighting(mut self, highlighting: bool) -> Self {
        self.highlighting = highlighting;
        self
    }

    pub fn build(self) -> QueryRequest {
        QueryRequest {
            query: self.query,
            page: self.page,
            facets: self.facets,
            filters: self.filters,
            highlighting: self.highlighting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Query {
        Query::field_query("assignedBy", "UniProt").unwrap()
    }

    #[test]
    fn page_rejects_zero_number_or_size() {
        assert!(matches!(Page::new(0, 10), Err(Error::InvalidArgument(_))));
        assert!(matches!(Page::new(1, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn page_start_is_zero_based() {
        assert_eq!(Page::new(1, 25).unwrap().start(), 0);
        assert_eq!(Page::new(3, 25).unwrap().start(), 50);
    }

    #[test]
    fn facet_rejects_blank_field() {
        assert!(Facet::new("").is_err());
        assert!(Facet::new("  ").is_err());
        assert_eq!(Facet::new("aspect").unwrap().field(), "aspect");
    }

    #[test]
    fn minimal_request_has_no_page_facets_or_filters() {
        let request = Builder::new(root()).build();
        assert_eq!(request.query(), &root());
        assert!(request.page().is_none());
        assert!(request.facets().is_empty());
        assert!(request.filters().is_empty());
        assert!(!request.highlighting());
    }

    #[test]
    fn scalar_settings_keep_the_last_value() {
        let request = Builder::new(root())
            .set_page(1, 10)
            .unwrap()
            .set_highlighting(true)
            .set_page(2, 25)
            .unwrap()
            .set_highlighting(false)
            .build();

        assert_eq!(request.page(), Some(&Page::new(2, 25).unwrap()));
        assert!(!request.highlighting());
    }

    #[test]
    fn facets_and_filters_are_appended_in_order() {
        let taxon = Query::field_query("taxonId", "9606").unwrap();
        let evidence = Query::field_query("evidenceCode", "IEA").unwrap();

        let request = Builder::new(root())
            .add_facet("aspect")
            .unwrap()
            .add_filter(taxon.clone())
            .add_facet("taxonId")
            .unwrap()
            .add_filter(evidence.clone())
            .build();

        let facets: Vec<_> = request.facets().iter().map(Facet::field).collect();
        assert_eq!(facets, vec!["aspect", "taxonId"]);
        assert_eq!(request.filters(), &[taxon, evidence]);
    }

    #[test]
    fn invalid_page_on_builder_is_an_invalid_argument() {
        let err = Builder::new(root()).set_page(0, 25).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn equality_is_structural_over_all_parts() {
        let build = |highlight: bool| {
            QueryRequest::builder(root())
                .set_page(1, 25)
                .unwrap()
                .add_facet("aspect")
                .unwrap()
                .set_highlighting(highlight)
                .build()
        };

        assert_eq!(build(true), build(true));
        assert_ne!(build(true), build(false));
    }
}
