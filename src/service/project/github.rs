//! GitHub Projects (v2) implementation of the project service.
//!
//! Items are read through the GraphQL API. The `projectV2` connection hangs off
//! either the `organization` or the `user` root, so the query text is built
//! per owner kind and the response is mapped into [`OwnerItems`].

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::{
    base::{
        config::Config,
        types::{IssueContent, IssueState, ItemsPage, ItemsPageRequest, OwnerItems, OwnerType, PageInfo, ProjectItem, Res},
    },
    service::USER_AGENT,
};

use super::{GenericProjectClient, ProjectClient};

/// Largest page GitHub serves for `items`.
pub const PAGE_SIZE: u32 = 100;

/// Placeholder for the owner root field in [`ITEMS_QUERY`].
const OWNER_ROOT: &str = "__OWNER_ROOT__";

/// Placeholder for the page size in [`ITEMS_QUERY`].
const PAGE_SIZE_SLOT: &str = "__PAGE_SIZE__";

const ITEMS_QUERY: &str = r#"
query GetProjectIssues($owner: String!, $projectId: Int!, $dueDate: String!, $after: String) {
  __OWNER_ROOT__(login: $owner) {
    projectV2(number: $projectId) {
      items(first: __PAGE_SIZE__, after: $after) {
        nodes {
          fieldValueByName(name: $dueDate) {
            ... on ProjectV2ItemFieldDateValue {
              date
            }
          }
          content {
            ... on Issue {
              number
              state
              assignees(first: 20) {
                nodes {
                  login
                }
              }
            }
          }
        }
        pageInfo {
          hasNextPage
          endCursor
        }
      }
    }
  }
}"#;

/// Build the items query for the given owner kind.
pub fn items_query(owner_type: OwnerType) -> String {
    ITEMS_QUERY
        .replace(OWNER_ROOT, owner_type.root_field())
        .replace(PAGE_SIZE_SLOT, &PAGE_SIZE.to_string())
}

// Extra methods on `ProjectClient` applied by the github implementation.

impl ProjectClient {
    /// Creates a new GitHub project client.
    pub fn github(config: &Config) -> Res<Self> {
        let client = GitHubProjectClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<GitHubProjectClient> for ProjectClient {
    fn from(client: GitHubProjectClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// GitHub GraphQL project client implementation.
#[derive(Clone)]
pub struct GitHubProjectClient {
    client: Client,
    graphql_url: String,
    token: String,
}

impl GitHubProjectClient {
    /// Create a new GitHub project client.
    #[instrument(name = "GitHubProjectClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
            token: config.gh_token.clone(),
        })
    }
}

#[async_trait]
impl GenericProjectClient for GitHubProjectClient {
    #[instrument(name = "GitHubProjectClient::fetch_items_page", skip_all, fields(owner = %request.owner, after = ?request.after))]
    async fn fetch_items_page(&self, request: &ItemsPageRequest) -> Res<OwnerItems> {
        let body = json!({
            "query": items_query(request.owner_type),
            "variables": {
                "owner": request.owner,
                "projectId": request.project_number,
                "dueDate": request.due_date_field,
                "after": request.after,
            },
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("GitHub GraphQL request failed with status {status}: {error_text}"));
        }

        let response = response.json::<GraphQlResponse>().await?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            let messages = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join(", ");
            return Err(anyhow!("GraphQL errors: {messages}"));
        }

        let Some(data) = response.data else {
            debug!("GraphQL response carried no data.");
            return Ok(OwnerItems::Absent);
        };

        Ok(data.into_owner_items(request.owner_type))
    }
}

// Wire types.

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ItemsData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    organization: Option<OwnerNode>,
    user: Option<OwnerNode>,
}

impl ItemsData {
    fn into_owner_items(self, owner_type: OwnerType) -> OwnerItems {
        let root = match owner_type {
            OwnerType::Organization => self.organization,
            OwnerType::User => self.user,
        };

        let Some(page) = root.and_then(|o| o.project_v2).and_then(|p| p.items).map(ItemsPage::from) else {
            return OwnerItems::Absent;
        };

        match owner_type {
            OwnerType::Organization => OwnerItems::Organization(page),
            OwnerType::User => OwnerItems::User(page),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerNode {
    project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemConnection {
    #[serde(default)]
    nodes: Option<Vec<Option<ItemNode>>>,
    page_info: Option<PageInfoNode>,
}

impl From<ItemConnection> for ItemsPage {
    fn from(connection: ItemConnection) -> Self {
        ItemsPage {
            items: connection.nodes.unwrap_or_default().into_iter().flatten().map(ProjectItem::from).collect(),
            page_info: connection.page_info.map(|p| PageInfo {
                has_next_page: p.has_next_page,
                end_cursor: p.end_cursor,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfoNode {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemNode {
    field_value_by_name: Option<DateValueNode>,
    content: Option<ContentNode>,
}

impl From<ItemNode> for ProjectItem {
    fn from(node: ItemNode) -> Self {
        ProjectItem {
            // A value without `date` means the named field is not a date field;
            // the item is kept and later reported as not due.
            due_date: node.field_value_by_name.map(|v| v.date.unwrap_or_default()),
            content: node.content.and_then(ContentNode::into_issue),
        }
    }
}

/// A date field value; `date` is missing when the named field is not a date field.
#[derive(Debug, Deserialize)]
struct DateValueNode {
    date: Option<String>,
}

/// Item content; every field is missing when the content is not an issue.
#[derive(Debug, Deserialize)]
struct ContentNode {
    number: Option<u64>,
    state: Option<IssueState>,
    assignees: Option<Connection<AssigneeNode>>,
}

impl ContentNode {
    fn into_issue(self) -> Option<IssueContent> {
        Some(IssueContent {
            number: self.number?,
            state: self.state?,
            assignees: self.assignees.map(|a| a.nodes.into_iter().flatten().map(|n| n.login).collect()).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
struct AssigneeNode {
    login: String,
}
