use super::escape::escape_query_chars;
use super::SOLR_FIELD_SEPARATOR;
use crate::query::{CompositeQuery, FieldQuery, NoFieldQuery, Query, QueryOp, QueryVisitor};
use std::collections::BTreeSet;

/// Renders query trees as Solr standard query syntax.
///
/// - `FieldQuery` → `field:(value)`
/// - `NoFieldQuery` → `(value)`
/// - `AND`/`OR` → `(child AND child ...)`
/// - `NOT` → `NOT (child)`
///
/// Values are escaped with [`escape_query_chars`]. Rendering is total: every
/// well-formed tree produces a string.
///
/// When built with grouped fields, an `OR` whose children are all field
/// queries on one of those fields collapses into a single field-scoped group,
/// `(field:(v1 OR v2))`.
#[derive(Debug, Clone, Default)]
pub struct SolrQuerySerializer {
    grouped_fields: BTreeSet<String>,
}

impl SolrQuerySerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grouped_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grouped_fields: BTreeSet<String> = fields.into_iter().map(Into::into).collect();
        if grouped_fields.is_empty() {
            tracing::warn!(
                "No grouped fields configured: OR queries will not be collapsed into field groups"
            );
        }
        Self { grouped_fields }
    }

    pub fn serialize(&self, query: &Query) -> String {
        let mut renderer = Renderer {
            grouped_fields: &self.grouped_fields,
        };
        query.accept(&mut renderer)
    }
}

struct Renderer<'a> {
    grouped_fields: &'a BTreeSet<String>,
}

impl Renderer<'_> {
    /// Values of an OR over a single grouped field, or `None` if the children
    /// have any other shape.
    fn grouped_values<'q>(&self, query: &'q CompositeQuery) -> Option<(&'q str, Vec<&'q str>)> {
        let mut field: Option<&str> = None;
        let mut values = Vec::with_capacity(query.queries().len());
        for child in query.queries() {
            let child = child.as_field()?;
            match field {
                Some(f) if f != child.field() => return None,
                Some(_) => {}
                None => {
                    if !self.grouped_fields.contains(child.field()) {
                        return None;
                    }
                    field = Some(child.field());
                }
            }
            values.push(child.value());
        }
        field.map(|f| (f, values))
    }
}

impl QueryVisitor<String> for Renderer<'_> {
    fn visit_no_field(&mut self, query: &NoFieldQuery) -> String {
        format!("({})", escape_query_chars(query.value()))
    }

    fn visit_field(&mut self, query: &FieldQuery) -> String {
        format!(
            "{}{}({})",
            query.field(),
            SOLR_FIELD_SEPARATOR,
            escape_query_chars(query.value())
        )
    }

    fn visit_composite(&mut self, query: &CompositeQuery) -> String {
        let operator = query.operator();
        if operator == QueryOp::Not {
            let inner: Vec<String> = query.queries().iter().map(|q| q.accept(self)).collect();
            return format!("{} ({})", operator, inner.join(" "));
        }

        if operator == QueryOp::Or && !self.grouped_fields.is_empty() {
            if let Some((field, values)) = self.grouped_values(query) {
                let values: Vec<String> = values.into_iter().map(escape_query_chars).collect();
                return format!(
                    "({}{}({}))",
                    field,
                    SOLR_FIELD_SEPARATOR,
                    values.join(" OR ")
                );
            }
        }

        let separator = format!(" {} ", operator);
        let parts: Vec<String> = query.queries().iter().map(|q| q.accept(self)).collect();
        format!("({})", parts.join(&separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field: &str, value: &str) -> Query {
        Query::field_query(field, value).unwrap()
    }

    #[test]
    fn field_query_renders_field_scoped_group() {
        let serializer = SolrQuerySerializer::new();
        assert_eq!(
            serializer.serialize(&field("assignedBy", "UniProt")),
            "assignedBy:(UniProt)"
        );
    }

    #[test]
    fn no_field_query_renders_parenthesised_value() {
        let serializer = SolrQuerySerializer::new();
        let query = Query::no_field_query("value1").unwrap();
        assert_eq!(serializer.serialize(&query), "(value1)");
    }

    #[test]
    fn colon_inside_value_is_escaped() {
        let serializer = SolrQuerySerializer::new();
        assert_eq!(
            serializer.serialize(&field("field1", "prefix:value1")),
            "field1:(prefix\\:value1)"
        );
    }

    #[test]
    fn nested_composites_are_fully_parenthesised() {
        let serializer = SolrQuerySerializer::new();
        let and = Query::and([field("field1", "value1"), field("field2", "value2")]).unwrap();
        let or = Query::or([and, field("field3", "value3")]).unwrap();

        // Field leaves sort before composites in the child set.
        assert_eq!(
            serializer.serialize(&or),
            "(field3:(value3) OR (field1:(value1) AND field2:(value2)))"
        );
    }

    #[test]
    fn three_way_and_joins_every_child() {
        let serializer = SolrQuerySerializer::new();
        let query = Query::and([
            field("field1", "value1"),
            field("field2", "value2"),
            field("field3", "value3"),
        ])
        .unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(field1:(value1) AND field2:(value2) AND field3:(value3))"
        );
    }

    #[test]
    fn not_negates_its_single_operand() {
        let serializer = SolrQuerySerializer::new();
        let query = Query::not(field("qualifier", "NOT"));
        assert_eq!(serializer.serialize(&query), "NOT (qualifier:(NOT))");
    }

    #[test]
    fn not_inside_and_stays_unambiguous() {
        let serializer = SolrQuerySerializer::new();
        let query = Query::and([
            field("taxonId", "9606"),
            Query::not(field("evidenceCode", "IEA")),
        ])
        .unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(taxonId:(9606) AND NOT (evidenceCode:(IEA)))"
        );
    }

    #[test]
    fn default_serializer_never_collapses_or() {
        let serializer = SolrQuerySerializer::new();
        let query = Query::or([field("goId", "GO:1"), field("goId", "GO:2")]).unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(goId:(GO\\:1) OR goId:(GO\\:2))"
        );
    }

    #[test]
    fn grouped_field_or_collapses_into_one_group() {
        let serializer = SolrQuerySerializer::with_grouped_fields(["goId"]);
        let query = Query::or([field("goId", "GO:1"), field("goId", "GO:2")]).unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(goId:(GO\\:1 OR GO\\:2))"
        );
    }

    #[test]
    fn mixed_fields_fall_back_to_plain_or() {
        let serializer = SolrQuerySerializer::with_grouped_fields(["goId"]);
        let query = Query::or([field("goId", "GO:1"), field("taxonId", "9606")]).unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(goId:(GO\\:1) OR taxonId:(9606))"
        );
    }

    #[test]
    fn ungrouped_field_or_is_not_collapsed() {
        let serializer = SolrQuerySerializer::with_grouped_fields(["goId"]);
        let query = Query::or([field("taxonId", "1"), field("taxonId", "2")]).unwrap();
        assert_eq!(
            serializer.serialize(&query),
            "(taxonId:(1) OR taxonId:(2))"
        );
    }
}
