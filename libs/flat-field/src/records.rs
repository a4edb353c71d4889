//! Typed records stored as flat fields in ontology documents
//!
//! Each record maps its attributes positionally onto the children of one
//! node. Reading checks the arity and that every position has the expected
//! kind (leaf or nested node).

use crate::codec;
use crate::error::{Error, Result};
use crate::field::FlatField;

pub trait FlatRecord: Sized {
    /// Name used in shape errors.
    const RECORD: &'static str;

    fn to_flat_field(&self) -> FlatField;

    fn from_flat_field(field: &FlatField) -> Result<Self>;

    fn encode(&self) -> String {
        codec::build(&self.to_flat_field())
    }

    fn decode(text: &str) -> Result<Self> {
        Self::from_flat_field(&codec::parse(text)?)
    }
}

fn children<'a>(record: &'static str, field: &'a FlatField, arity: usize) -> Result<&'a [FlatField]> {
    let children = field
        .children()
        .ok_or_else(|| Error::shape(record, "expected a node, found a leaf"))?;
    if children.len() != arity {
        return Err(Error::shape(
            record,
            format!("expected {arity} values, found {}", children.len()),
        ));
    }
    Ok(children)
}

fn leaf(record: &'static str, children: &[FlatField], index: usize) -> Result<String> {
    children[index]
        .as_leaf()
        .map(str::to_string)
        .ok_or_else(|| Error::shape(record, format!("expected a value at position {index}")))
}

fn node_of<'a, I>(values: I) -> FlatField
where
    I: IntoIterator<Item = &'a String>,
{
    values
        .into_iter()
        .fold(FlatField::node(), |field, value| field.with_leaf(value))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synonym {
    pub name: String,
    pub synonym_type: String,
}

impl FlatRecord for Synonym {
    const RECORD: &'static str = "synonym";

    fn to_flat_field(&self) -> FlatField {
        node_of([&self.name, &self.synonym_type])
    }

    fn from_flat_field(field: &FlatField) -> Result<Self> {
        let c = children(Self::RECORD, field, 2)?;
        Ok(Self {
            name: leaf(Self::RECORD, c, 0)?,
            synonym_type: leaf(Self::RECORD, c, 1)?,
        })
    }
}

/// Database cross reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xref {
    pub db_code: String,
    pub db_id: String,
    pub name: String,
}

impl FlatRecord for Xref {
    const RECORD: &'static str = "xref";

    fn to_flat_field(&self) -> FlatField {
        node_of([&self.db_code, &self.db_id, &self.name])
    }

    fn from_flat_field(field: &FlatField) -> Result<Self> {
        let c = children(Self::RECORD, field, 3)?;
        Ok(Self {
            db_code: leaf(Self::RECORD, c, 0)?,
            db_id: leaf(Self::RECORD, c, 1)?,
            name: leaf(Self::RECORD, c, 2)?,
        })
    }
}

/// Term change history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub name: String,
    pub timestamp: String,
    pub action: String,
    pub category: String,
    pub text: String,
}

impl FlatRecord for History {
    const RECORD: &'static str = "history";

    fn to_flat_field(&self) -> FlatField {
        node_of([
            &self.name,
            &self.timestamp,
            &self.action,
            &self.category,
            &self.text,
        ])
    }

    fn from_flat_field(field: &FlatField) -> Result<Self> {
        let c = children(Self::RECORD, field, 5)?;
        Ok(Self {
            name: leaf(Self::RECORD, c, 0)?,
            timestamp: leaf(Self::RECORD, c, 1)?,
            action: leaf(Self::RECORD, c, 2)?,
            category: leaf(Self::RECORD, c, 3)?,
            text: leaf(Self::RECORD, c, 4)?,
        })
    }
}

/// Relation from a GO term to a term in another ontology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossOntologyRelation {
    pub foreign_id: String,
    pub foreign_term: String,
    pub other_namespace: String,
    pub url: String,
    pub relation: String,
}

impl FlatRecord for CrossOntologyRelation {
    const RECORD: &'static str = "cross ontology relation";

    fn to_flat_field(&self) -> FlatField {
        node_of([
            &self.foreign_id,
            &self.foreign_term,
            &self.other_namespace,
            &self.url,
            &self.relation,
        ])
    }

    fn from_flat_field(field: &FlatField) -> Result<Self> {
        let c = children(Self::RECORD, field, 5)?;
        Ok(Self {
            foreign_id: leaf(Self::RECORD, c, 0)?,
            foreign_term: leaf(Self::RECORD, c, 1)?,
            other_namespace: leaf(Self::RECORD, c, 2)?,
            url: leaf(Self::RECORD, c, 3)?,
            relation: leaf(Self::RECORD, c, 4)?,
        })
    }
}

/// Taxon restriction on where a term may be used, with its supporting
/// citations stored as a nested node. Blank citations are not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonConstraint {
    pub ancestor_id: String,
    pub ancestor_name: String,
    pub relationship: String,
    pub tax_id: String,
    pub tax_id_type: String,
    pub tax_name: String,
    pub citations: Vec<String>,
}

impl FlatRecord for TaxonConstraint {
    const RECORD: &'static str = "taxon constraint";

    fn to_flat_field(&self) -> FlatField {
        node_of([
            &self.ancestor_id,
            &self.ancestor_name,
            &self.relationship,
            &self.tax_id,
            &self.tax_id_type,
            &self.tax_name,
        ])
        .with_field(node_of(
            self.citations.iter().filter(|c| !c.trim().is_empty()),
        ))
    }

    fn from_flat_field(field: &FlatField) -> Result<Self> {
        let c = children(Self::RECORD, field, 7)?;
        let citations = c[6]
            .children()
            .ok_or_else(|| Error::shape(Self::RECORD, "expected nested citations at position 6"))?
            .iter()
            .enumerate()
            .map(|(i, citation)| {
                citation.as_leaf().map(str::to_string).ok_or_else(|| {
                    Error::shape(Self::RECORD, format!("citation {i} is not a value"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ancestor_id: leaf(Self::RECORD, c, 0)?,
            ancestor_name: leaf(Self::RECORD, c, 1)?,
            relationship: leaf(Self::RECORD, c, 2)?,
            tax_id: leaf(Self::RECORD, c, 3)?,
            tax_id_type: leaf(Self::RECORD, c, 4)?,
            tax_name: leaf(Self::RECORD, c, 5)?,
            citations,
        })
    }
}
