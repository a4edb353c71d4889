use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Stored text is not a well-formed flat field. `position` is a byte offset.
    #[error("Malformed flat field at byte {position}: {reason}")]
    MalformedFlatField { position: usize, reason: String },

    #[error("Unexpected {record} shape: {reason}")]
    UnexpectedShape { record: &'static str, reason: String },
}

impl Error {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedFlatField {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(record: &'static str, reason: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            record,
            reason: reason.into(),
        }
    }
}
