use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The kind of account that owns the project board.
///
/// GitHub exposes `projectV2` under a different root field for each kind,
/// so this also selects the root of the items query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerType {
    #[default]
    Organization,
    User,
}

impl OwnerType {
    /// The GraphQL root field for this owner kind.
    pub fn root_field(&self) -> &'static str {
        match self {
            OwnerType::Organization => "organization",
            OwnerType::User => "user",
        }
    }
}

impl FromStr for OwnerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Res<Self> {
        match s {
            "organization" => Ok(OwnerType::Organization),
            "user" => Ok(OwnerType::User),
            other => Err(anyhow!("Invalid owner_type: {other}. Must be 'organization' or 'user'.")),
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_field())
    }
}

/// The repository the run is acting on (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Res<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(Repository {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(anyhow!("Invalid repository: `{s}`. Expected `owner/name`.")),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// State of the issue linked to a project item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
    #[serde(other)]
    Other,
}

/// The issue behind a project item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContent {
    pub number: u64,
    pub state: IssueState,
    /// Assignee logins, in the order GitHub returns them.
    pub assignees: Vec<String>,
}

/// One row of a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Value of the configured date field, if set.
    pub due_date: Option<String>,
    /// `None` for drafts, pull requests, and redacted items.
    pub content: Option<IssueContent>,
}

impl ProjectItem {
    /// Whether the item is an open issue with a due date set.
    pub fn is_open_with_due_date(&self) -> bool {
        self.due_date.is_some() && self.content.as_ref().is_some_and(|c| c.state == IssueState::Open)
    }
}

/// Pagination metadata returned with each page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of project items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemsPage {
    pub items: Vec<ProjectItem>,
    pub page_info: Option<PageInfo>,
}

/// The owner-kind-dependent root of an items query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerItems {
    Organization(ItemsPage),
    User(ItemsPage),
    /// The response carried no project under the expected root.
    Absent,
}

impl OwnerItems {
    pub fn into_page(self) -> Option<ItemsPage> {
        match self {
            OwnerItems::Organization(page) | OwnerItems::User(page) => Some(page),
            OwnerItems::Absent => None,
        }
    }
}

/// Parameters of a single items page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsPageRequest {
    pub owner_type: OwnerType,
    pub owner: String,
    pub project_number: u64,
    pub due_date_field: String,
    pub after: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_type_parse() {
        assert_eq!("organization".parse::<OwnerType>().unwrap(), OwnerType::Organization);
        assert_eq!("user".parse::<OwnerType>().unwrap(), OwnerType::User);

        let err = "team".parse::<OwnerType>().unwrap_err();
        assert!(err.to_string().contains("Invalid owner_type: team"));

        // Matching is exact.
        assert!("User".parse::<OwnerType>().is_err());
        assert!("".parse::<OwnerType>().is_err());
    }

    #[test]
    fn test_repository_parse() {
        let repo: Repository = "octo-org/widgets".parse().unwrap();
        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "octo-org/widgets");

        assert!("widgets".parse::<Repository>().is_err());
        assert!("/widgets".parse::<Repository>().is_err());
        assert!("a/b/c".parse::<Repository>().is_err());
    }

    #[test]
    fn test_issue_state_deserialize() {
        let states: Vec<IssueState> = serde_json::from_str(r#"["OPEN", "CLOSED", "MERGED"]"#).unwrap();
        assert_eq!(states, vec![IssueState::Open, IssueState::Closed, IssueState::Other]);
    }

    #[test]
    fn test_is_open_with_due_date() {
        let issue = |state| IssueContent { number: 1, state, assignees: vec![] };

        let open = ProjectItem { due_date: Some("2024-05-02".into()), content: Some(issue(IssueState::Open)) };
        let closed = ProjectItem { due_date: Some("2024-05-02".into()), content: Some(issue(IssueState::Closed)) };
        let undated = ProjectItem { due_date: None, content: Some(issue(IssueState::Open)) };
        let draft = ProjectItem { due_date: Some("2024-05-02".into()), content: None };

        assert!(open.is_open_with_due_date());
        assert!(!closed.is_open_with_due_date());
        assert!(!undated.is_open_with_due_date());
        assert!(!draft.is_open_with_due_date());
    }
}
