//! Load configuration via `config` crate with env-override support.
//!
//! Inputs follow the GitHub Actions convention, where an action input `x`
//! arrives as the `INPUT_X` environment variable. Actions pass unset inputs as
//! empty strings, so empty values are treated as absent throughout.

use std::{ops::Deref, sync::Arc};

use anyhow::anyhow;
use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use super::types::{OwnerType, Res};

/// Default name of the project field holding the due date.
pub const DEFAULT_DUE_DATE_FIELD_NAME: &str = "Due date";

/// Default REST API base URL.
fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Default GraphQL endpoint.
fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

/// Configuration for a notifier run.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Token used for both the project query and comment creation (`INPUT_GH_TOKEN`).
    pub gh_token: String,
    /// Number of the project board (`INPUT_PROJECT_ID`).
    pub project_id: u64,
    /// Name of the date field on the project (`INPUT_DUE_DATE_FIELD_NAME`).
    #[serde(default)]
    pub due_date_field_name: Option<String>,
    /// Either `organization` or `user` (`INPUT_OWNER_TYPE`).
    ///
    /// Kept as a raw string so that an invalid value surfaces as a run failure
    /// with a readable message instead of a deserialization error.
    #[serde(default)]
    pub owner_type: Option<String>,
    /// Comment body template (`INPUT_TEMPLATE`).
    pub template: String,
    /// Handle to mention when an issue has no assignees (`INPUT_FALLBACK_ASSIGNEE`).
    #[serde(default)]
    pub fallback_assignee: Option<String>,
    /// REST API base URL (`INPUT_API_URL`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// GraphQL endpoint (`INPUT_GRAPHQL_URL`).
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            gh_token: String::new(),
            project_id: 0,
            due_date_field_name: None,
            owner_type: None,
            template: String::new(),
            fallback_assignee: None,
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
        }
    }
}

impl ConfigInner {
    /// The owner kind, defaulting to `organization`.
    pub fn owner_type(&self) -> Res<OwnerType> {
        match non_empty(&self.owner_type) {
            Some(value) => value.parse(),
            None => Ok(OwnerType::default()),
        }
    }

    /// The due date field name, defaulting to [`DEFAULT_DUE_DATE_FIELD_NAME`].
    pub fn due_date_field_name(&self) -> &str {
        non_empty(&self.due_date_field_name).unwrap_or(DEFAULT_DUE_DATE_FIELD_NAME)
    }

    /// The fallback assignee, defaulting to the repository owner.
    pub fn fallback_assignee<'a>(&'a self, repository_owner: &'a str) -> &'a str {
        non_empty(&self.fallback_assignee).unwrap_or(repository_owner)
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("INPUT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        }

        Self::from_builder(cfg)
    }

    /// Build and validate a configuration from prepared sources.
    pub fn from_builder(cfg: ConfigBuilder<DefaultState>) -> Res<Self> {
        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.gh_token.trim().is_empty() {
            return Err(anyhow!("Input `gh_token` must not be empty."));
        }

        if result.template.trim().is_empty() {
            return Err(anyhow!("Input `template` must not be empty."));
        }

        result.owner_type()?;

        Ok(result)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_toml(toml: &str) -> Res<Config> {
        Config::from_builder(config::Config::builder().add_source(config::File::from_str(toml, config::FileFormat::Toml)))
    }

    #[test]
    fn test_defaults() {
        let config = load_toml(
            r#"
            gh_token = "ghp_test"
            project_id = 7
            template = "Hi {assignee}"
            "#,
        )
        .unwrap();

        assert_eq!(config.project_id, 7);
        assert_eq!(config.owner_type().unwrap(), OwnerType::Organization);
        assert_eq!(config.due_date_field_name(), "Due date");
        assert_eq!(config.fallback_assignee("octo-org"), "octo-org");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.graphql_url, "https://api.github.com/graphql");
    }

    #[test]
    fn test_empty_inputs_fall_back_to_defaults() {
        let config = load_toml(
            r#"
            gh_token = "ghp_test"
            project_id = 7
            template = "Hi {assignee}"
            due_date_field_name = ""
            owner_type = ""
            fallback_assignee = "  "
            "#,
        )
        .unwrap();

        assert_eq!(config.owner_type().unwrap(), OwnerType::Organization);
        assert_eq!(config.due_date_field_name(), "Due date");
        assert_eq!(config.fallback_assignee("octo-org"), "octo-org");
    }

    #[test]
    fn test_explicit_values() {
        let config = load_toml(
            r#"
            gh_token = "ghp_test"
            project_id = 3
            template = "Hi {assignee}"
            due_date_field_name = "Deadline"
            owner_type = "user"
            fallback_assignee = "alice"
            "#,
        )
        .unwrap();

        assert_eq!(config.owner_type().unwrap(), OwnerType::User);
        assert_eq!(config.due_date_field_name(), "Deadline");
        assert_eq!(config.fallback_assignee("octo-org"), "alice");
    }

    #[test]
    fn test_invalid_owner_type() {
        let err = load_toml(
            r#"
            gh_token = "ghp_test"
            project_id = 3
            template = "Hi {assignee}"
            owner_type = "team"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Invalid owner_type: team"));
    }

    #[test]
    fn test_missing_required_inputs() {
        let cases = [
            "project_id = 3\ntemplate = \"x\"",
            "gh_token = \"t\"\ntemplate = \"x\"",
            "gh_token = \"t\"\nproject_id = 3",
            "gh_token = \"\"\nproject_id = 3\ntemplate = \"x\"",
            "gh_token = \"t\"\nproject_id = 3\ntemplate = \" \"",
        ];

        for case in cases {
            assert!(load_toml(case).is_err(), "expected an error for:\n{case}");
        }
    }
}
