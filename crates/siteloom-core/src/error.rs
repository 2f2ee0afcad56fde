//! Error types for Siteloom Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No tenant or site record exists for the given key.
    ///
    /// User-visible as "site not found", not an error page.
    #[error("Not found")]
    NotFound,

    /// A site record exists but is in Draft state.
    ///
    /// Rendered identically to `NotFound` on public paths so that the
    /// existence of unpublished drafts does not leak.
    #[error("Not published")]
    NotPublished,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    // Multi-tenancy errors
    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    #[error("Invalid subdomain: {0}")]
    InvalidSubdomain(String),

    /// The structured store or blob store is unreachable.
    ///
    /// Retried once by the backend before being surfaced; never silently
    /// treated as `NotFound`.
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    // Backend errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
