//! Searchable field capability
//!
//! The set of field names a client may query, filter or facet on. It is built
//! once when the process starts and only read afterwards, so a single instance
//! can be shared between request handlers behind an `Arc`.

use phf::phf_set;
use std::collections::BTreeSet;

/// Fields indexed in the ontology core.
static ONTOLOGY_FIELDS: phf::Set<&'static str> = phf_set! {
    "aspect",
    "id",
    "definition",
    "name",
    "ontologyType",
    "synonymName",
};

/// Fields indexed in the annotation core.
static ANNOTATION_FIELDS: phf::Set<&'static str> = phf_set! {
    "assignedBy",
    "evidenceCode",
    "goId",
    "goEvidence",
    "qualifier",
    "reference",
    "taxonId",
    "geneProductId",
    "geneProductType",
    "withFrom",
    "extension",
    "targetSet",
    "aspect",
};

pub trait SearchableField: Send + Sync {
    fn is_searchable(&self, field: &str) -> bool;

    fn searchable_fields(&self) -> BTreeSet<String>;
}

/// A fixed set of searchable field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchableFields {
    fields: BTreeSet<String>,
}

impl SearchableFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ontology() -> Self {
        Self::new(ONTOLOGY_FIELDS.iter().copied())
    }

    pub fn annotation() -> Self {
        Self::new(ANNOTATION_FIELDS.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SearchableField for SearchableFields {
    fn is_searchable(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    fn searchable_fields(&self) -> BTreeSet<String> {
        self.fields.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for SearchableFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
