//! GraphQL response shapes for the viewer query.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A repository node with its identity fields and every other selected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    /// `owner/name`, the REST patch target.
    pub name_with_owner: String,
    pub is_archived: bool,
    pub is_fork: bool,
    /// Current values of the configured setting fields, keyed by GraphQL name.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Repository {
    /// Current value of a GraphQL field; `Value::Null` when the node lacks it.
    pub fn field(&self, name: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(name).unwrap_or(&NULL)
    }
}

/// A GraphQL connection page; only `nodes` is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Connection<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self { nodes }
    }
}

/// An organization the viewer belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub login: String,
    #[serde(default)]
    pub repositories: Connection<Repository>,
}

/// The authenticated user's own repositories and organizations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewer {
    #[serde(default)]
    pub repositories: Connection<Repository>,
    #[serde(default)]
    pub organizations: Connection<Organization>,
}

/// `data` payload of the viewer query.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ViewerData {
    pub viewer: Viewer,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repository_keeps_setting_fields() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "widgets",
            "nameWithOwner": "acme/widgets",
            "isArchived": false,
            "isFork": true,
            "deleteBranchOnMerge": false,
            "hasWikiEnabled": true,
        }))
        .expect("decode");
        assert_eq!(repo.name_with_owner, "acme/widgets");
        assert!(repo.is_fork);
        assert_eq!(repo.field("deleteBranchOnMerge"), &json!(false));
        assert_eq!(repo.field("hasWikiEnabled"), &json!(true));
        assert_eq!(repo.field("notSelected"), &Value::Null);
        assert!(!repo.fields.contains_key("name"));
    }

    #[test]
    fn envelope_with_errors_and_null_data() {
        let env: GraphQlResponse<ViewerData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "Field 'bogus' doesn't exist", "locations": []}],
        }))
        .expect("decode");
        assert!(env.data.is_none());
        assert_eq!(env.errors[0].message, "Field 'bogus' doesn't exist");
    }
}
