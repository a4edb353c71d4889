//! Raw search parameters and their assembly into a [`QueryRequest`]
//!
//! Mirrors the parameters a search endpoint receives: free text, page size
//! (`limit`), one-based `page`, repeated `filterQuery` and `facet` values and a
//! highlighting switch. Validation runs first; only input that passes every
//! check reaches the query converter.

use crate::converter::StringToQueryConverter;
use crate::dispatcher::{
    is_valid_facets, is_valid_filter_queries, is_valid_num_rows, is_valid_page, is_valid_query,
};
use crate::error::{Error, Result};
use crate::request::{Builder, QueryRequest};
use crate::searchable::SearchableField;

pub const DEFAULT_LIMIT: i64 = 25;
pub const DEFAULT_PAGE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub query: Option<String>,
    pub limit: i64,
    pub page: i64,
    pub filter_queries: Option<Vec<String>>,
    pub facets: Option<Vec<String>>,
    pub highlighting: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            filter_queries: None,
            facets: None,
            highlighting: false,
        }
    }
}

impl SearchParameters {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Validates every parameter and builds the request.
    ///
    /// Fails with [`Error::BadRequest`] naming the first rejected parameter.
    pub fn into_request(
        self,
        converter: &StringToQueryConverter,
        searchable: &dyn SearchableField,
    ) -> Result<QueryRequest> {
        if !is_valid_query(self.query.as_deref()) {
            return Err(Error::BadRequest("Query cannot be empty".into()));
        }
        if !is_valid_num_rows(self.limit) {
            return Err(Error::BadRequest(format!(
                "Number of rows must be greater than 0, got {}",
                self.limit
            )));
        }
        if !is_valid_page(self.page) {
            return Err(Error::BadRequest(format!(
                "Page must be greater than 0, got {}",
                self.page
            )));
        }
        if !is_valid_facets(searchable, self.facets.as_deref()) {
            return Err(Error::BadRequest(format!(
                "Facets must be searchable fields: {:?}",
                self.facets.unwrap_or_default()
            )));
        }
        if !is_valid_filter_queries(searchable, self.filter_queries.as_deref()) {
            return Err(Error::BadRequest(format!(
                "Filter queries must have the form field:value on a searchable field: {:?}",
                self.filter_queries.unwrap_or_default()
            )));
        }

        let text = self.query.unwrap_or_default();
        let page = u32::try_from(self.page)
            .map_err(|_| Error::BadRequest(format!("Page is too large: {}", self.page)))?;
        let limit = u32::try_from(self.limit)
            .map_err(|_| Error::BadRequest(format!("Number of rows is too large: {}", self.limit)))?;

        let mut builder = Builder::new(converter.convert(&text)?)
            .set_page(page, limit)?
            .set_highlighting(self.highlighting);

        for facet in self.facets.unwrap_or_default() {
            builder = builder.add_facet(facet)?;
        }
        for filter in self.filter_queries.unwrap_or_default() {
            builder = builder.add_filter(converter.convert(&filter)?);
        }

        Ok(builder.build())
    }
}
