//! Error types for repoconf-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading the configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly requested config file does not exist.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// No explicit path was given and no default-named file exists.
    #[error(
        "no config found: could not find .repo-config.yml or .repo-config.yaml in {dir}; \
         create one or pass --config explicitly"
    )]
    NoConfigFound { dir: PathBuf },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but has no `settings` mapping.
    #[error("invalid config at {path}: missing required key `settings`")]
    MissingSettings { path: PathBuf },

    /// Neither the local secret file nor any token environment variable is set.
    #[error("no GitHub token found: create .gh-token or set GH_TOKEN")]
    TokenNotFound,

    /// The local secret file exists but could not be read.
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
