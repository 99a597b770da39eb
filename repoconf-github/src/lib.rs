//! # repoconf-github
//!
//! GitHub access for repoconf: the viewer query builder, response types, and
//! the [`GitHubApi`] seam with its HTTP implementation [`GitHubClient`].

pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::{GitHubApi, GitHubClient};
pub use error::ApiError;
pub use query::build_query;
pub use types::{Connection, Organization, Repository, Viewer};
