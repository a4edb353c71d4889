//! Nested records inside single text fields.
//!
//! Document stores without nested objects can still hold ordered sub-records
//! (synonyms, cross references, history entries) by writing each one as a
//! [`FlatField`] tree serialized with [`build`] and read back with [`parse`].
#![forbid(unsafe_code)]

mod codec;
mod error;
mod field;
mod records;

pub use codec::{build, parse, ESCAPE, LEVEL_END, LEVEL_START, VALUE_SEPARATOR};
pub use error::{Error, Result};
pub use field::FlatField;
pub use records::{CrossOntologyRelation, FlatRecord, History, Synonym, TaxonConstraint, Xref};
