//! repoconf core library — desired-state types, config loading, credentials, errors.
//!
//! - [`types`] — newtypes and the [`Config`] model
//! - [`error`] — [`ConfigError`]
//! - [`config`] — `.repo-config.yml` discovery and parsing
//! - [`token`] — GitHub token resolution

pub mod config;
pub mod error;
pub mod token;
pub mod types;

pub use error::ConfigError;
pub use types::{Affiliation, Config, OrgLogin, Setting, SettingName, Settings};
