use thiserror::Error;

/// Core error type shared across Relgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema source failed to parse; the parser's message is surfaced
    /// verbatim.
    #[error("schema parse error: {0}")]
    Parse(String),
    /// The schema violates an invariant generation depends on.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Relgen crates.
pub type Result<T> = std::result::Result<T, Error>;
