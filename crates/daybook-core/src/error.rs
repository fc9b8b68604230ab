//! Error types for Daybook core operations
//!
//! Validation and not-found conditions are recoverable at the caller
//! boundary; database and rendering failures propagate as-is.

use thiserror::Error;

/// A field rejected before a write is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title was empty or whitespace-only
    #[error("title must not be empty")]
    EmptyTitle,

    /// Content was empty or whitespace-only
    #[error("content must not be empty")]
    EmptyContent,
}

/// Errors that can occur in store, query, and export operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid field on create or update
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No entry with this id at read/update/delete/export time
    #[error("entry not found: {id}")]
    NotFound { id: i64 },

    /// SQLite error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// PDF layout or rendering failed
    #[error("failed to render document: {0}")]
    Render(#[from] genpdf::error::Error),

    /// No usable TrueType font family on this system
    #[error("no usable font family found (searched: {searched})")]
    FontDiscovery { searched: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for conditions the caller surfaces as a user-facing message
    /// rather than a failure of the program itself.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
