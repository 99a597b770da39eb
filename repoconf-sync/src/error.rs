//! Error types for repoconf-sync.

use thiserror::Error;

use repoconf_core::ConfigError;
use repoconf_github::ApiError;

/// Errors that abort a reconciliation run.
///
/// Per-repository patch failures are not errors here; they are recorded in the
/// run summary and the run continues.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Config file or credentials could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The repository query failed.
    #[error("GitHub API error: {0}")]
    Api(#[from] ApiError),
}
