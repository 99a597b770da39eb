//! `.repo-config.yml` discovery and loading.
//!
//! # Lookup
//!
//! ```text
//! --config <path>        explicit; must exist
//! <cwd>/.repo-config.yml
//! <cwd>/.repo-config.yaml
//! ```
//!
//! # API pattern
//!
//! Every function that touches the working directory has two forms:
//! - `fn_at(cwd: &Path, …)` — explicit directory; used in tests with `TempDir`
//! - `fn(…)` — derives the directory from `std::env::current_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{Affiliation, Config, OrgLogin, Settings};

/// Default config file names, in lookup priority order.
pub const DEFAULT_CONFIG_NAMES: [&str; 2] = [".repo-config.yml", ".repo-config.yaml"];

/// On-disk shape; every key is optional so defaults can be applied after parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    settings: Option<Settings>,
    orgs: Option<Vec<OrgLogin>>,
    skip_forks: Option<bool>,
    affiliations: Option<Vec<Affiliation>>,
}

// ---------------------------------------------------------------------------
// 1. Resolve
// ---------------------------------------------------------------------------

/// Pick the config file to load.
///
/// An explicit path must exist; it is never replaced by a default-named file.
/// Relative explicit paths are resolved against `cwd`.
pub fn resolve_config_path_at(
    cwd: &Path,
    explicit: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        if !path.is_file() {
            return Err(ConfigError::ConfigNotFound { path });
        }
        return Ok(path);
    }

    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NoConfigFound {
            dir: cwd.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Resolve and parse the config file.
///
/// Returns `ConfigError::Parse` (with path + line context) if malformed and
/// `ConfigError::MissingSettings` if the `settings` mapping is absent.
pub fn load_config_at(cwd: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = resolve_config_path_at(cwd, explicit)?;
    let contents = std::fs::read_to_string(&path)?;
    parse_config(path, &contents)
}

/// `load_config_at` convenience wrapper.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_at(&std::env::current_dir()?, explicit)
}

/// Parse config contents already read from `path`.
pub fn parse_config(path: PathBuf, contents: &str) -> Result<Config, ConfigError> {
    let document: serde_yaml::Value = serde_yaml::from_str(contents).map_err(|e| {
        ConfigError::Parse {
            path: path.clone(),
            source: e,
        }
    })?;
    if document.is_null() {
        return Err(ConfigError::MissingSettings { path });
    }

    let raw: RawConfig = serde_yaml::from_value(document).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        source: e,
    })?;
    let Some(settings) = raw.settings else {
        return Err(ConfigError::MissingSettings { path });
    };

    let affiliations = match raw.affiliations {
        Some(list) if !list.is_empty() => list,
        _ => vec![Affiliation::default()],
    };

    Ok(Config {
        path,
        settings,
        orgs: raw.orgs.unwrap_or_default(),
        skip_forks: raw.skip_forks.unwrap_or(true),
        affiliations,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
