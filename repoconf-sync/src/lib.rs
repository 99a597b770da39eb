//! # repoconf-sync
//!
//! Reconciliation of repository settings against the configured desired state.
//!
//! Call [`pipeline::run`] to load the config and reconcile against GitHub, or
//! [`reconcile`] with any [`repoconf_github::GitHubApi`] implementation.

pub mod error;
pub mod pipeline;
pub mod reconcile;

pub use error::ReconcileError;
pub use reconcile::{
    collect_repositories, diff_repository, patch_body, reconcile, reconcile_with, Event,
    OrgWarning, RepoOutcome, RunSummary, SettingChange,
};
