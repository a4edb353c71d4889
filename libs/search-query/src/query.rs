//! Query AST
//!
//! A [`Query`] is an immutable boolean query tree. Leaves restrict a value to a
//! field ([`FieldQuery`]) or leave it unscoped ([`NoFieldQuery`]); inner nodes
//! combine children with a logical operator ([`CompositeQuery`]).
//!
//! The tree knows nothing about any backend syntax. Renderers implement
//! [`QueryVisitor`] and are driven through [`Query::accept`].
//!
//! ```
//! use quickgo_search::{Query, QueryOp};
//!
//! let taxon = Query::field_query("taxonId", "9606").unwrap();
//! let evidence = Query::field_query("evidenceCode", "IEA").unwrap();
//! let both = Query::composite([taxon, evidence], QueryOp::And).unwrap();
//! assert_eq!(both.as_composite().unwrap().queries().len(), 2);
//! ```

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Logical operator joining the children of a [`CompositeQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOp {
    And,
    Or,
    Not,
}

impl QueryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for QueryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid("Logical query operator cannot be empty"));
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "NOT" => Ok(Self::Not),
            _ => Err(Error::invalid(format!(
                "Unknown logical query operator: {trimmed}"
            ))),
        }
    }
}

/// Matches a value against the default (unscoped) search field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NoFieldQuery {
    value: String,
}

impl NoFieldQuery {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::invalid("Value to search for cannot be empty"));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Matches a value restricted to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldQuery {
    field: String,
    value: String,
}

impl FieldQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let field = field.into();
        let value = value.into();
        if field.trim().is_empty() {
            return Err(Error::invalid("Field cannot be empty"));
        }
        if value.is_empty() {
            return Err(Error::invalid("Value to search for cannot be empty"));
        }
        Ok(Self { field, value })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Boolean combination of child queries.
///
/// Children form a set: insertion order and duplicates do not affect equality
/// or hashing. Iteration follows the set's ordering, which is stable for a
/// given instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompositeQuery {
    operator: QueryOp,
    queries: BTreeSet<Query>,
}

impl CompositeQuery {
    /// Fails when `queries` is empty, or when a `NOT` is given anything other
    /// than exactly one operand.
    pub fn new(queries: impl IntoIterator<Item = Query>, operator: QueryOp) -> Result<Self> {
        let queries: BTreeSet<Query> = queries.into_iter().collect();
        if queries.is_empty() {
            return Err(Error::invalid("Queries to compose cannot be empty"));
        }
        if operator == QueryOp::Not && queries.len() != 1 {
            return Err(Error::invalid(format!(
                "NOT queries can only be applied to 1 query; received {}",
                queries.len()
            )));
        }
        Ok(Self { operator, queries })
    }

    pub fn operator(&self) -> QueryOp {
        self.operator
    }

    pub fn queries(&self) -> &BTreeSet<Query> {
        &self.queries
    }
}

/// Boolean query tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Query {
    NoField(NoFieldQuery),
    Field(FieldQuery),
    Composite(CompositeQuery),
}

impl Query {
    /// `value` restricted to `field`.
    pub fn field_query(field: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        FieldQuery::new(field, value).map(Self::Field)
    }

    /// `value` against the default field.
    pub fn no_field_query(value: impl Into<String>) -> Result<Self> {
        NoFieldQuery::new(value).map(Self::NoField)
    }

    pub fn composite(queries: impl IntoIterator<Item = Query>, operator: QueryOp) -> Result<Self> {
        CompositeQuery::new(queries, operator).map(Self::Composite)
    }

    pub fn and(queries: impl IntoIterator<Item = Query>) -> Result<Self> {
        Self::composite(queries, QueryOp::And)
    }

    pub fn or(queries: impl IntoIterator<Item = Query>) -> Result<Self> {
        Self::composite(queries, QueryOp::Or)
    }

    /// Negation always has exactly one operand, so it cannot fail.
    pub fn not(query: Query) -> Self {
        let mut queries = BTreeSet::new();
        queries.insert(query);
        Self::Composite(CompositeQuery {
            operator: QueryOp::Not,
            queries,
        })
    }

    /// Double dispatch: calls the visitor method matching this node's variant,
    /// handing over the node itself so the visitor can descend into children.
    pub fn accept<T, V>(&self, visitor: &mut V) -> T
    where
        V: QueryVisitor<T> + ?Sized,
    {
        match self {
            Self::NoField(query) => visitor.visit_no_field(query),
            Self::Field(query) => visitor.visit_field(query),
            Self::Composite(query) => visitor.visit_composite(query),
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeQuery> {
        match self {
            Self::Composite(query) => Some(query),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldQuery> {
        match self {
            Self::Field(query) => Some(query),
            _ => None,
        }
    }
}

impl From<FieldQuery> for Query {
    fn from(query: FieldQuery) -> Self {
        Self::Field(query)
    }
}

impl From<NoFieldQuery> for Query {
    fn from(query: NoFieldQuery) -> Self {
        Self::NoField(query)
    }
}

impl From<CompositeQuery> for Query {
    fn from(query: CompositeQuery) -> Self {
        Self::Composite(query)
    }
}

/// One method per [`Query`] variant. Implementors decide the result type.
pub trait QueryVisitor<T> {
    fn visit_no_field(&mut self, query: &NoFieldQuery) -> T;
    fn visit_field(&mut self, query: &FieldQuery) -> T;
    fn visit_composite(&mut self, query: &CompositeQuery) -> T;
}
