//! Diff-and-patch reconciliation of repository settings.
//!
//! ## One run
//!
//! 1. Build the viewer query from the configured fields and fetch it.
//! 2. Own repositories, then repositories of every accessible org listed in `orgs`.
//! 3. Per repository, in response order: skip archived, skip conformant,
//!    skip forks when `skipForks` is set, otherwise patch.
//! 4. Patch failures are recorded and the run moves on.

use serde_json::{Map, Value};

use repoconf_core::types::{Config, OrgLogin, SettingName, Settings};
use repoconf_github::{query, ApiError, GitHubApi, Repository, Viewer};

use crate::error::ReconcileError;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One configured field whose current value differs from the desired one.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingChange {
    pub field: SettingName,
    /// Current value; `Value::Null` when the repository node lacked the field.
    pub from: Value,
    pub to: Value,
}

/// Outcome for a repository that needed a patch.
#[derive(Debug)]
pub enum RepoOutcome {
    /// The PATCH request succeeded.
    Patched {
        repo: String,
        changes: Vec<SettingChange>,
    },
    /// The PATCH request failed; the repository is left as it was.
    Failed {
        repo: String,
        changes: Vec<SettingChange>,
        error: ApiError,
    },
}

impl RepoOutcome {
    /// `owner/name` of the repository.
    pub fn repo(&self) -> &str {
        match self {
            RepoOutcome::Patched { repo, .. } | RepoOutcome::Failed { repo, .. } => repo,
        }
    }

    pub fn changes(&self) -> &[SettingChange] {
        match self {
            RepoOutcome::Patched { changes, .. } | RepoOutcome::Failed { changes, .. } => changes,
        }
    }
}

/// A configured organization the viewer cannot see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgWarning {
    pub login: OrgLogin,
    /// Logins of the organizations that are accessible.
    pub accessible: Vec<String>,
}

/// Progress notifications, emitted in processing order.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    OrgNotAccessible(&'a OrgWarning),
    Processed(&'a RepoOutcome),
}

/// Summary of a reconciliation run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<RepoOutcome>,
    pub warnings: Vec<OrgWarning>,
    pub skipped_archived: usize,
    pub skipped_forks: usize,
    pub conformant: usize,
}

impl RunSummary {
    /// Number of repositories whose settings were modified.
    pub fn changed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RepoOutcome::Patched { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RepoOutcome::Failed { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Fields of `repo` whose current value differs from the configured one, in config order.
pub fn diff_repository(settings: &Settings, repo: &Repository) -> Vec<SettingChange> {
    settings
        .iter()
        .filter_map(|(name, setting)| {
            let current = repo.field(&name.0);
            (*current != setting.value).then(|| SettingChange {
                field: name.clone(),
                from: current.clone(),
                to: setting.value.clone(),
            })
        })
        .collect()
}

/// REST payload carrying every configured setting, not only the drifting ones.
pub fn patch_body(settings: &Settings) -> Map<String, Value> {
    settings
        .iter()
        .map(|(_, setting)| (setting.rest_name.clone(), setting.value.clone()))
        .collect()
}

/// Flatten own repositories and those of the configured, accessible orgs.
///
/// Configured logins that are not accessible yield an [`OrgWarning`] and no repositories.
pub fn collect_repositories(viewer: Viewer, config: &Config) -> (Vec<Repository>, Vec<OrgWarning>) {
    let accessible: Vec<String> = viewer
        .organizations
        .nodes
        .iter()
        .map(|org| org.login.clone())
        .collect();

    let warnings = config
        .orgs
        .iter()
        .filter(|login| !accessible.contains(&login.0))
        .map(|login| OrgWarning {
            login: login.clone(),
            accessible: accessible.clone(),
        })
        .collect();

    let mut repos = viewer.repositories.nodes;
    for org in viewer.organizations.nodes {
        if config.includes_org(&org.login) {
            repos.extend(org.repositories.nodes);
        }
    }
    (repos, warnings)
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Run one reconciliation pass against `api`.
pub fn reconcile<A>(api: &A, config: &Config) -> Result<RunSummary, ReconcileError>
where
    A: GitHubApi + ?Sized,
{
    reconcile_with(api, config, |_| {})
}

/// [`reconcile`], reporting each warning and processed repository to `on_event` as it happens.
pub fn reconcile_with<A, F>(
    api: &A,
    config: &Config,
    mut on_event: F,
) -> Result<RunSummary, ReconcileError>
where
    A: GitHubApi + ?Sized,
    F: FnMut(Event<'_>),
{
    let affiliations = query::affiliation_list(&config.affiliations);
    let gql = query::build_query(config.settings.fields(), &affiliations);
    let viewer = api.fetch(&gql)?;

    let (repos, warnings) = collect_repositories(viewer, config);
    let mut summary = RunSummary::default();

    for warning in &warnings {
        tracing::warn!(
            "configured org '{}' is not accessible; accessible orgs are {:?}",
            warning.login,
            warning.accessible
        );
        on_event(Event::OrgNotAccessible(warning));
    }
    summary.warnings = warnings;

    let body = patch_body(&config.settings);
    for repo in repos {
        if repo.is_archived {
            tracing::debug!("skip archived: {}", repo.name_with_owner);
            summary.skipped_archived += 1;
            continue;
        }

        let changes = diff_repository(&config.settings, &repo);
        if changes.is_empty() {
            tracing::debug!("conformant: {}", repo.name_with_owner);
            summary.conformant += 1;
            continue;
        }

        if config.skip_forks && repo.is_fork {
            tracing::debug!("skip fork: {}", repo.name_with_owner);
            summary.skipped_forks += 1;
            continue;
        }

        let outcome = match api.patch(&repo.name_with_owner, &body) {
            Ok(()) => {
                tracing::info!(
                    "patched {} ({} field(s))",
                    repo.name_with_owner,
                    changes.len()
                );
                RepoOutcome::Patched {
                    repo: repo.name_with_owner,
                    changes,
                }
            }
            Err(error) => {
                tracing::debug!("patch failed for {}: {error}", repo.name_with_owner);
                RepoOutcome::Failed {
                    repo: repo.name_with_owner,
                    changes,
                    error,
                }
            }
        };
        on_event(Event::Processed(&outcome));
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
