//! # Tokenizer Errors

use thiserror::Error;

/// Errors raised by vocabularies and tokenizers.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// Inconsistent construction, or an operation that needs a missing binding.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A token id outside of ``[0, size)``.
    #[error("token id {id} out of range for vocabulary of size {size}")]
    Index {
        /// The offending id.
        id: usize,
        /// The vocabulary size.
        size: usize,
    },

    /// A pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(String),

    /// IO failure while reading vocabulary data.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for tokenizer operations.
pub type TokenizerResult<T> = Result<T, TokenizerError>;

impl TokenizerError {
    /// Build a [`TokenizerError::Configuration`].
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Is this a [`TokenizerError::Configuration`]?
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Is this a [`TokenizerError::Index`]?
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }

    /// Is this a [`TokenizerError::Io`]?
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
