//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by `AssistantService`.
///
/// A failed question never touches textbook progress; the transcript records
/// an error marker and the caller decides what to show.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssistantError {
    #[error("assistant is not configured")]
    Disabled,
    #[error("question is empty")]
    EmptyQuestion,
    #[error("assistant returned an empty response")]
    EmptyResponse,
    #[error("assistant request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping the textbook.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextbookError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
