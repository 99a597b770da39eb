//! GraphQL query construction for the viewer's repositories.
//!
//! Configured field names are inserted verbatim. They are not escaped or
//! validated; a malformed name fails at the API, not here.

use repoconf_core::Affiliation;

/// Page size for every connection in the query. Later pages are not fetched.
pub const PAGE_SIZE: u32 = 100;

/// Identity fields selected on every repository node.
pub const IDENTITY_FIELDS: [&str; 4] = ["name", "nameWithOwner", "isArchived", "isFork"];

const TEMPLATE: &str = "{
  viewer {
    repositories(first: {page}, affiliations: [{affiliations}]) {
      nodes {
{identity}
{settings}
      }
    }
    organizations(first: {page}) {
      nodes {
        login
        repositories(first: {page}) {
          nodes {
{identity}
{settings}
          }
        }
      }
    }
  }
}";

/// Render an affiliation filter as GraphQL enum list contents, e.g. `OWNER, COLLABORATOR`.
pub fn affiliation_list(affiliations: &[Affiliation]) -> String {
    affiliations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the viewer query selecting `fields` on own and organization repositories.
///
/// `affiliations` is spliced into the own-repositories filter as-is. The joined
/// field block appears exactly twice and `affiliations` exactly once.
pub fn build_query<'a, I>(fields: I, affiliations: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let settings = fields.into_iter().collect::<Vec<_>>().join("\n");
    let identity = IDENTITY_FIELDS.join("\n");

    // Substitute the caller-controlled pieces last so their contents are never rescanned.
    TEMPLATE
        .replace("{page}", &PAGE_SIZE.to_string())
        .replace("{identity}", &identity)
        .replace("{affiliations}", affiliations)
        .replace("{settings}", &settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [&str; 2] = ["allowSquashMerge", "deleteBranchOnMerge"];

    #[test]
    fn query_is_deterministic() {
        let a = build_query(FIELDS, "OWNER");
        let b = build_query(FIELDS, "OWNER");
        assert_eq!(a, b);
    }

    #[test]
    fn settings_twice_affiliations_once() {
        let settings = FIELDS.join("\n");
        let query = build_query(FIELDS, "foobar");
        assert_eq!(query.matches(&settings).count(), 2);
        assert_eq!(query.matches("foobar").count(), 1);
        assert!(query.contains("affiliations: [foobar]"));
    }

    #[test]
    fn identity_fields_on_every_node() {
        let query = build_query(FIELDS, "OWNER");
        for field in ["nameWithOwner", "isArchived", "isFork"] {
            assert_eq!(query.matches(field).count(), 2, "field {field}");
        }
        assert_eq!(query.matches("first: 100").count(), 3);
    }

    #[test]
    fn field_names_are_not_escaped() {
        let query = build_query(["squashMergeCommitTitle {weird}"], "OWNER");
        assert!(query.contains("squashMergeCommitTitle {weird}"));
    }

    #[test]
    fn braces_balance() {
        let query = build_query(FIELDS, "OWNER");
        assert_eq!(query.matches('{').count(), query.matches('}').count());
    }

    #[test]
    fn affiliation_list_joins_graphql_names() {
        let list = affiliation_list(&[Affiliation::Owner, Affiliation::OrganizationMember]);
        assert_eq!(list, "OWNER, ORGANIZATION_MEMBER");
    }
}
