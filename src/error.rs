use thiserror::Error;

/// Errors raised while configuring the extractor or processing an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LgbphsError {
    /// Inconsistent or unsupported parameters. Reported at construction,
    /// except for split names parsed from text.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The image cannot be processed (empty, malformed buffer, non-finite
    /// pixels, or smaller than a block).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Block or bin counts disagree between passes of the same image.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),
}

impl LgbphsError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LgbphsError>;
