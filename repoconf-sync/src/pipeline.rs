//! Shared reconciliation entrypoint used by the CLI.

use std::path::Path;

use repoconf_core::types::Config;
use repoconf_core::{config, token};
use repoconf_github::{GitHubApi, GitHubClient};

use crate::reconcile::{reconcile_with, Event, RunSummary};
use crate::ReconcileError;

/// Load the config, resolve credentials, and reconcile against GitHub.
///
/// Config problems surface before the token is looked up, and both before any
/// network call. `cwd` anchors config discovery and the `.gh-token` lookup.
pub fn run<F>(
    cwd: &Path,
    explicit_config: Option<&Path>,
    on_event: F,
) -> Result<RunSummary, ReconcileError>
where
    F: FnMut(Event<'_>),
{
    let config = config::load_config_at(cwd, explicit_config)?;
    let token = token::resolve_token_at(cwd)?;
    let client = GitHubClient::from_env(token);
    run_with(&client, &config, on_event)
}

/// [`run`] with an already loaded config and any [`GitHubApi`].
pub fn run_with<A, F>(api: &A, config: &Config, on_event: F) -> Result<RunSummary, ReconcileError>
where
    A: GitHubApi + ?Sized,
    F: FnMut(Event<'_>),
{
    tracing::debug!(
        "loaded {} setting(s) from {}",
        config.settings.len(),
        config.path.display()
    );
    reconcile_with(api, config, on_event)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;

    use repoconf_core::ConfigError;
    use repoconf_github::{ApiError, Connection, Repository, Viewer};
    use serde_json::{json, Map, Value};
    use tempfile::TempDir;

    use super::*;

    /// Serves a fixed viewer and records every patch.
    struct Recorder {
        viewer: Viewer,
        patched: RefCell<Vec<(String, Map<String, Value>)>>,
    }

    impl GitHubApi for Recorder {
        fn fetch(&self, _query: &str) -> Result<Viewer, ApiError> {
            Ok(self.viewer.clone())
        }

        fn patch(&self, name_with_owner: &str, body: &Map<String, Value>) -> Result<(), ApiError> {
            self.patched
                .borrow_mut()
                .push((name_with_owner.to_string(), body.clone()));
            Ok(())
        }
    }

    fn repo(full: &str, delete_branch: bool) -> Repository {
        serde_json::from_value(json!({
            "name": full.rsplit('/').next().unwrap_or(full),
            "nameWithOwner": full,
            "isArchived": false,
            "isFork": false,
            "deleteBranchOnMerge": delete_branch,
        }))
        .expect("repository node")
    }

    fn delete_branch_config() -> Config {
        config::parse_config(
            PathBuf::from(".repo-config.yml"),
            "settings:\n  deleteBranchOnMerge:\n    restName: delete_branch_on_merge\n    value: true\n",
        )
        .expect("config")
    }

    #[test]
    fn run_with_patches_drifting_repos_through_the_given_api() {
        let api = Recorder {
            viewer: Viewer {
                repositories: Connection::from(vec![repo("me/drifty", false), repo("me/tidy", true)]),
                organizations: Connection::default(),
            },
            patched: RefCell::new(Vec::new()),
        };
        let mut processed = Vec::new();
        let summary = run_with(&api, &delete_branch_config(), |event| {
            if let Event::Processed(outcome) = event {
                processed.push(outcome.repo().to_string());
            }
        })
        .expect("run");

        assert_eq!(processed, ["me/drifty"]);
        assert_eq!(summary.changed_count(), 1);
        assert_eq!(summary.conformant, 1);
        let patched = api.patched.borrow();
        assert_eq!(patched.len(), 1);
        assert_eq!(patched[0].0, "me/drifty");
        assert_eq!(
            Value::Object(patched[0].1.clone()),
            json!({ "delete_branch_on_merge": true })
        );
    }

    #[test]
    fn missing_config_fails_before_token_lookup() {
        let cwd = TempDir::new().expect("cwd");
        let err = run(cwd.path(), None, |_| {}).unwrap_err();
        assert!(
            matches!(err, ReconcileError::Config(ConfigError::NoConfigFound { .. })),
            "got: {err}"
        );
    }

    #[test]
    fn invalid_config_fails_before_network() {
        let cwd = TempDir::new().expect("cwd");
        fs::write(cwd.path().join(".repo-config.yml"), "orgs: [acme]\n").expect("write");
        fs::write(cwd.path().join(".gh-token"), "t0k3n\n").expect("write");
        let err = run(cwd.path(), None, |_| {}).unwrap_err();
        assert!(
            matches!(err, ReconcileError::Config(ConfigError::MissingSettings { .. })),
            "got: {err}"
        );
    }
}
