//! CLI error type.

use customer_core::db::DbError;
use customer_core::{CustomerServiceError, LoggingError, RepoError};
use thiserror::Error;

/// Failures that abort a command before an outcome can be reported.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to open customer store: {0}")]
    Db(#[from] DbError),
    #[error("customer store not usable: {0}")]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Service(#[from] CustomerServiceError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read payload from stdin: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),
}
