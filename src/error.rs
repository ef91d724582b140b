use thiserror::Error;

/// Errors the engine reports for caller-supplied input.
///
/// Configuration problems are never errors: they surface as warnings on the
/// evaluation result instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid URL format")]
    InvalidUrl { input: String },

    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("URL exceeds maximum length of {max} characters (got {length})")]
    UrlTooLong { length: usize, max: usize },

    #[error("URL must use http:// or https:// (got {scheme}://)")]
    UnsupportedScheme { scheme: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
