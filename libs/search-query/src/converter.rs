//! Conversion of raw user text into query leaves
//!
//! A token of the form `field:value` becomes a [`FieldQuery`](crate::FieldQuery)
//! only when `field` is a declared searchable field. Anything else is treated
//! as a plain value, so identifiers such as `GO:0003824` are not mistaken for
//! a field restriction.

use crate::error::{Error, Result};
use crate::query::Query;
use crate::searchable::SearchableField;
use std::fmt;
use std::sync::Arc;

pub const FIELD_SEPARATOR: char = ':';

#[derive(Clone)]
pub struct StringToQueryConverter {
    default_field: Option<String>,
    searchable: Arc<dyn SearchableField>,
}

impl StringToQueryConverter {
    /// Bare values become unscoped queries.
    pub fn new(searchable: Arc<dyn SearchableField>) -> Self {
        Self {
            default_field: None,
            searchable,
        }
    }

    /// Bare values are scoped to `default_field`.
    pub fn with_default_field(
        default_field: impl Into<String>,
        searchable: Arc<dyn SearchableField>,
    ) -> Result<Self> {
        let default_field = default_field.into();
        if default_field.trim().is_empty() {
            return Err(Error::invalid("Default search field cannot be empty"));
        }
        Ok(Self {
            default_field: Some(default_field),
            searchable,
        })
    }

    pub fn default_field(&self) -> Option<&str> {
        self.default_field.as_deref()
    }

    pub fn convert(&self, text: &str) -> Result<Query> {
        if text.trim().is_empty() {
            return Err(Error::invalid("Query text cannot be empty"));
        }

        if let Some((field, value)) = text.split_once(FIELD_SEPARATOR) {
            if !value.is_empty() && self.searchable.is_searchable(field) {
                return Query::field_query(field, value);
            }
            tracing::debug!(
                prefix = field,
                "Field prefix is not searchable, treating whole text as a value"
            );
        }

        match &self.default_field {
            Some(field) => Query::field_query(field.as_str(), text),
            None => Query::no_field_query(text),
        }
    }
}

impl fmt::Debug for StringToQueryConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringToQueryConverter")
            .field("default_field", &self.default_field)
            .field("searchable", &self.searchable.searchable_fields())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searchable::SearchableFields;

    const DEFAULT_FIELD: &str = "text";

    fn fields(names: &[&str]) -> Arc<dyn SearchableField> {
        Arc::new(SearchableFields::new(names.iter().copied()))
    }

    fn converter_with_default(names: &[&str]) -> StringToQueryConverter {
        StringToQueryConverter::with_default_field(DEFAULT_FIELD, fields(names)).unwrap()
    }

    #[test]
    fn blank_default_field_is_rejected() {
        let err = StringToQueryConverter::with_default_field("  ", fields(&[])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument("Default search field cannot be empty".into())
        );
    }

    #[test]
    fn converts_searchable_field_and_value() {
        let converter = converter_with_default(&["field1"]);
        let query = converter.convert("field1:value1").unwrap();
        assert_eq!(query, Query::field_query("field1", "value1").unwrap());
    }

    #[test]
    fn bare_value_uses_default_field() {
        let converter = converter_with_default(&[]);
        let query = converter.convert("value1").unwrap();
        assert_eq!(query, Query::field_query(DEFAULT_FIELD, "value1").unwrap());
    }

    #[test]
    fn bare_value_without_default_field_is_unscoped() {
        let converter = StringToQueryConverter::new(fields(&[]));
        let query = converter.convert("value1").unwrap();
        assert_eq!(query, Query::no_field_query("value1").unwrap());
    }

    #[test]
    fn unknown_prefix_falls_back_to_default_field() {
        let converter = converter_with_default(&["field1"]);
        let query = converter.convert("va:lue1").unwrap();
        assert_eq!(query, Query::field_query(DEFAULT_FIELD, "va:lue1").unwrap());
    }

    #[test]
    fn go_identifier_is_not_split_on_its_colon() {
        let converter = StringToQueryConverter::new(fields(&["taxonId"]));
        let query = converter.convert("GO:0003824").unwrap();
        assert_eq!(query, Query::no_field_query("GO:0003824").unwrap());
    }

    #[test]
    fn only_the_first_colon_separates_field_from_value() {
        let converter = StringToQueryConverter::new(fields(&["goId"]));
        let query = converter.convert("goId:GO:0003824").unwrap();
        assert_eq!(query, Query::field_query("goId", "GO:0003824").unwrap());
    }

    #[test]
    fn searchable_field_with_empty_value_is_treated_as_text() {
        let converter = StringToQueryConverter::new(fields(&["taxonId"]));
        let query = converter.convert("taxonId:").unwrap();
        assert_eq!(query, Query::no_field_query("taxonId:").unwrap());
    }

    #[test]
    fn empty_or_blank_text_is_rejected() {
        let converter = converter_with_default(&[]);
        assert!(matches!(converter.convert(""), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            converter.convert("   "),
            Err(Error::InvalidArgument(_))
        ));
    }
}
