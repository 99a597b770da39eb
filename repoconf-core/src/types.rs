//! Domain types for the desired repository state.
//!
//! All types deserialize from the `.repo-config.yml` document via serde + serde_yaml.
//! Setting values are carried as [`serde_json::Value`] so they compare directly
//! against GraphQL results and serialize directly into REST payloads.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// GraphQL field name of a repository setting, e.g. `deleteBranchOnMerge`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettingName(pub String);

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SettingName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SettingName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Login of a GitHub organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgLogin(pub String);

impl fmt::Display for OrgLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgLogin {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgLogin {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The viewer's relationship to a repository, used to filter own repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affiliation {
    #[default]
    Owner,
    Collaborator,
    OrganizationMember,
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affiliation::Owner => write!(f, "OWNER"),
            Affiliation::Collaborator => write!(f, "COLLABORATOR"),
            Affiliation::OrganizationMember => write!(f, "ORGANIZATION_MEMBER"),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// A single desired repository attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    /// Field name in the REST `PATCH /repos/{owner}/{repo}` payload.
    pub rest_name: String,
    /// Desired value; a boolean or other scalar.
    pub value: Value,
}

impl Setting {
    pub fn new(rest_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            rest_name: rest_name.into(),
            value: value.into(),
        }
    }
}

/// Configured settings keyed by GraphQL field name, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings(Vec<(SettingName, Setting)>);

impl Settings {
    pub fn iter(&self) -> impl Iterator<Item = (&SettingName, &Setting)> {
        self.0.iter().map(|(name, setting)| (name, setting))
    }

    /// GraphQL field names in document order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.0.as_str())
    }

    pub fn get(&self, field: &str) -> Option<&Setting> {
        self.0
            .iter()
            .find(|(name, _)| name.0 == field)
            .map(|(_, setting)| setting)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SettingName, Setting)> for Settings {
    fn from_iter<I: IntoIterator<Item = (SettingName, Setting)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SettingsVisitor)
    }
}

struct SettingsVisitor;

impl<'de> Visitor<'de> for SettingsVisitor {
    type Value = Settings;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of setting name to {restName, value}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Settings, A::Error> {
        let mut entries: Vec<(SettingName, Setting)> = Vec::new();
        while let Some((name, setting)) = map.next_entry::<SettingName, Setting>()? {
            if setting.value.is_array() || setting.value.is_object() {
                return Err(de::Error::custom(format!(
                    "setting `{name}` must have a scalar value"
                )));
            }
            entries.push((name, setting));
        }
        Ok(Settings(entries))
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// The full desired state, loaded once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File the configuration was loaded from.
    pub path: PathBuf,
    pub settings: Settings,
    /// Organizations whose repositories are reconciled alongside the viewer's own.
    pub orgs: Vec<OrgLogin>,
    pub skip_forks: bool,
    /// Affiliation filter for the viewer's own repositories.
    pub affiliations: Vec<Affiliation>,
}

impl Config {
    pub fn includes_org(&self, login: &str) -> bool {
        self.orgs.iter().any(|org| org.0 == login)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
