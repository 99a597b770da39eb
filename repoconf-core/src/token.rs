//! GitHub token resolution.
//!
//! Sources, in priority order:
//!
//! 1. **Secret file** - `<cwd>/.gh-token`, trimmed; keeps the token out of shell history
//! 2. **`GH_TOKEN`** - the variable GitHub Actions workflows usually export
//! 3. **`GITHUB_TOKEN`** - fallback for runners that only provide the default token

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::error::ConfigError;

/// Name of the local secret file looked up in the working directory.
pub const TOKEN_FILE_NAME: &str = ".gh-token";

/// Environment variables consulted after the secret file.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolve the token, reading environment variables through `env`.
///
/// An empty (or whitespace-only) source is treated as absent.
pub fn resolve_token_with<F>(cwd: &Path, env: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file: PathBuf = cwd.join(TOKEN_FILE_NAME);
    if file.is_file() {
        let contents = std::fs::read_to_string(&file).map_err(|source| ConfigError::TokenFile {
            path: file.clone(),
            source,
        })?;
        let token = contents.trim();
        if !token.is_empty() {
            return Ok(SecretString::from(token.to_string()));
        }
    }

    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| env(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(SecretString::from)
        .ok_or(ConfigError::TokenNotFound)
}

/// `resolve_token_with` against the process environment.
pub fn resolve_token_at(cwd: &Path) -> Result<SecretString, ConfigError> {
    resolve_token_with(cwd, |name| std::env::var(name).ok())
}

/// `resolve_token_at` convenience wrapper.
pub fn resolve_token() -> Result<SecretString, ConfigError> {
    resolve_token_at(&std::env::current_dir()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn secret_file_wins_over_env() {
        let cwd = TempDir::new().expect("tempdir");
        std::fs::write(cwd.path().join(TOKEN_FILE_NAME), "file-token\n").expect("write");
        let token = resolve_token_with(cwd.path(), env_of(&[("GH_TOKEN", "env-token")]))
            .expect("token");
        assert_eq!(token.expose_secret(), "file-token");
    }

    #[test]
    fn gh_token_wins_over_github_token() {
        let cwd = TempDir::new().expect("tempdir");
        let env = env_of(&[("GH_TOKEN", "gh"), ("GITHUB_TOKEN", "github")]);
        let token = resolve_token_with(cwd.path(), env).expect("token");
        assert_eq!(token.expose_secret(), "gh");
    }

    #[test]
    fn blank_sources_are_skipped() {
        let cwd = TempDir::new().expect("tempdir");
        std::fs::write(cwd.path().join(TOKEN_FILE_NAME), "  \n").expect("write");
        let env = env_of(&[("GH_TOKEN", ""), ("GITHUB_TOKEN", "fallback")]);
        let token = resolve_token_with(cwd.path(), env).expect("token");
        assert_eq!(token.expose_secret(), "fallback");
    }

    #[test]
    fn no_source_is_token_not_found() {
        let cwd = TempDir::new().expect("tempdir");
        let err = resolve_token_with(cwd.path(), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::TokenNotFound));
    }
}
