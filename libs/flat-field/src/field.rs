//! The `FlatField` tree
//!
//! A small ordered document tree that only exists on its way into or out of a
//! single stored text field. Child order is positional data and is preserved.

use crate::codec;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlatField {
    Leaf(String),
    Node(Vec<FlatField>),
}

impl FlatField {
    /// A leaf holding `value` with surrounding whitespace removed.
    pub fn leaf(value: impl AsRef<str>) -> Self {
        Self::Leaf(value.as_ref().trim().to_string())
    }

    /// An empty node.
    pub fn node() -> Self {
        Self::Node(Vec::new())
    }

    /// Appends `field` as the last child.
    ///
    /// Called on a leaf, the leaf first becomes the single child of a new node.
    pub fn with_field(self, field: FlatField) -> Self {
        match self {
            Self::Node(mut children) => {
                children.push(field);
                Self::Node(children)
            }
            leaf @ Self::Leaf(_) => Self::Node(vec![leaf, field]),
        }
    }

    pub fn with_leaf(self, value: impl AsRef<str>) -> Self {
        self.with_field(Self::leaf(value))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[FlatField]> {
        match self {
            Self::Node(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    /// Leaf values in depth-first order.
    pub fn leaf_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(value) => out.push(value),
            Self::Node(children) => children.iter().for_each(|c| c.collect_leaves(out)),
        }
    }

    /// Number of nested levels; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Node(children) => 1 + children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// JSON form: a leaf is a string, a node is an array.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(value) => Value::String(value.clone()),
            Self::Node(children) => Value::Array(children.iter().map(Self::to_json).collect()),
        }
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::leaf(s)),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::Node),
            other => Err(Error::shape(
                "flat field JSON",
                format!("expected a string or an array, found {other}"),
            )),
        }
    }
}

impl From<Vec<FlatField>> for FlatField {
    fn from(children: Vec<FlatField>) -> Self {
        Self::Node(children)
    }
}

impl From<&FlatField> for Value {
    fn from(field: &FlatField) -> Self {
        field.to_json()
    }
}

impl TryFrom<&Value> for FlatField {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_json(value)
    }
}

/// Writes the stored text form.
impl fmt::Display for FlatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::build(self))
    }
}

impl FromStr for FlatField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse(s)
    }
}
