//! Error types for message construction and rendering.

use thiserror::Error;

/// Errors that can occur while deriving message headers or loading attachments.
#[derive(Debug, Error)]
pub enum Error {
    /// The sender's email address has no domain after `@`.
    #[error("Sender address has no domain: {0:?}")]
    MissingDomain(String),

    /// MIME operation failed.
    #[error("MIME error: {0}")]
    Mime(#[from] mailwright_mime::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
