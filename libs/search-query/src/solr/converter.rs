use super::serializer::SolrQuerySerializer;
use crate::error::{Error, Result};
use crate::request::QueryRequest;
use serde::Serialize;

pub const DEFAULT_REQUEST_HANDLER: &str = "/search";

const MIN_COUNT_TO_DISPLAY_FACET: u32 = 1;

/// Ordered Solr request parameters. Keys may repeat (`fq`, `facet.field`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolrParams {
    params: Vec<(String, String)>,
}

impl SolrParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// URL-encoded `key=value&key=value` form.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Converts a [`QueryRequest`] into the parameters of a Solr select request.
#[derive(Debug, Clone)]
pub struct SolrQueryConverter {
    request_handler: String,
    serializer: SolrQuerySerializer,
}

impl SolrQueryConverter {
    pub fn new(request_handler: impl Into<String>) -> Result<Self> {
        Self::with_serializer(request_handler, SolrQuerySerializer::new())
    }

    pub fn with_serializer(
        request_handler: impl Into<String>,
        serializer: SolrQuerySerializer,
    ) -> Result<Self> {
        let request_handler = request_handler.into();
        if request_handler.trim().is_empty() {
            return Err(Error::invalid("Request handler name cannot be empty"));
        }
        Ok(Self {
            request_handler,
            serializer,
        })
    }

    pub fn serializer(&self) -> &SolrQuerySerializer {
        &self.serializer
    }

    pub fn convert(&self, request: &QueryRequest) -> SolrParams {
        let mut params = SolrParams::new();
        params.add("q", self.serializer.serialize(request.query()));
        params.add("qt", self.request_handler.as_str());

        if let Some(page) = request.page() {
            params.add("start", page.start().to_string());
            params.add("rows", page.size().to_string());
        }

        for filter in request.filters() {
            params.add("fq", self.serializer.serialize(filter));
        }

        if !request.facets().is_empty() {
            params.add("facet", "true");
            for facet in request.facets() {
                params.add("facet.field", facet.field());
            }
            params.add("facet.mincount", MIN_COUNT_TO_DISPLAY_FACET.to_string());
        }

        if request.highlighting() {
            params.add("hl", "true");
        }

        params
    }
}
