//! Search dispatch and request validation
//!
//! The validators are pure predicates over raw request input. They never fail;
//! a `false` answer is meant to become a "bad request" response. [`dispatch`]
//! hands a validated request to a [`SearchService`].

use crate::error::Result;
use crate::request::QueryRequest;
use crate::searchable::SearchableField;
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_FILTER_QUERY_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+):[A-Za-z0-9_-]+$").expect("filter query pattern is valid")
});

/// Results of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub number_of_hits: u64,
    pub results: Vec<T>,
}

impl<T> QueryResult<T> {
    pub fn new(number_of_hits: u64, results: Vec<T>) -> Self {
        Self {
            number_of_hits,
            results,
        }
    }
}

/// A backend able to answer query requests.
pub trait SearchService<T> {
    fn find_by_query(&self, request: &QueryRequest) -> Result<QueryResult<T>>;
}

/// Passes `request` to `service`, logging any failure before returning it.
pub fn dispatch<T, S>(request: &QueryRequest, service: &S) -> Result<QueryResult<T>>
where
    S: SearchService<T> + ?Sized,
{
    service.find_by_query(request).inspect_err(|e| {
        tracing::error!(
            error = %e,
            request = ?request,
            "Unable to process search query request"
        );
    })
}

/// Present and not blank.
pub fn is_valid_query(query: Option<&str>) -> bool {
    query.is_some_and(|q| !q.trim().is_empty())
}

pub fn is_valid_num_rows(rows: i64) -> bool {
    rows > 0
}

pub fn is_valid_page(page: i64) -> bool {
    page > 0
}

/// Every facet must be searchable. No facets at all is valid.
pub fn is_valid_facets<S: AsRef<str>>(
    searchable: &dyn SearchableField,
    facets: Option<&[S]>,
) -> bool {
    facets.map_or(true, |facets| {
        facets.iter().all(|f| searchable.is_searchable(f.as_ref()))
    })
}

/// Every filter must look like `field:value` with a searchable `field`. No
/// filters at all is valid.
pub fn is_valid_filter_queries<S: AsRef<str>>(
    searchable: &dyn SearchableField,
    filter_queries: Option<&[S]>,
) -> bool {
    filter_queries.map_or(true, |filters| {
        filters.iter().all(|filter| {
            VALID_FILTER_QUERY_FORMAT
                .captures(filter.as_ref())
                .and_then(|caps| caps.get(1))
                .is_some_and(|field| searchable.is_searchable(field.as_str()))
        })
    })
}
