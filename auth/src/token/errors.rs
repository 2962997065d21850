use thiserror::Error;

/// Error type for token syntax checks.
///
/// Describes the shape of the input only; never whether a token exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenFormatError {
    #[error("Token must be exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Token contains characters outside the URL-safe base64 alphabet")]
    InvalidCharacters,
}
