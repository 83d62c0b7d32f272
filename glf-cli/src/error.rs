//! Error types for the scaffolding workflow.

use thiserror::Error;

/// Result type alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating a project from a template.
///
/// An empty catalog listing is deliberately not represented here: a listing
/// with zero items is a successful response and surfaces as an aborted
/// workflow outcome, so callers can always tell "no data" apart from
/// "request failed".
#[derive(Debug, Error)]
pub enum Error {
    /// The remote template catalog could not be reached, or answered with a
    /// non-success status.
    #[error("template catalog unavailable: {0}")]
    CatalogUnavailable(#[source] Box<ureq::Error>),

    /// The catalog answered, but the body did not match the expected schema.
    #[error("malformed catalog response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The template archive could not be downloaded or extracted.
    #[error("template download failed: {reason}")]
    DownloadFailed {
        /// Human-readable cause (locator, transport, extraction, or target path).
        reason: String,
    },

    /// An interactive prompt could not be completed.
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Build a [`Error::DownloadFailed`] from any displayable cause.
    pub fn download_failed(reason: impl Into<String>) -> Self {
        Self::DownloadFailed {
            reason: reason.into(),
        }
    }
}
