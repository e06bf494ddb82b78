//! Source provider settings for pipelines.
//!
//! The REST API reports settings under `provider.settings` with a shape that
//! depends on `provider.id`. Settings are modelled as a variant per provider
//! with every flag tri-state (`None` = absent), so a setting that is
//! explicitly `false` survives rendering instead of being mistaken for an
//! unset one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BuildkiteError, Result};

/// Flat `name -> "value"` view of provider settings.
pub type SettingsMap = IndexMap<String, String>;

/// Settings for GitHub and GitHub Enterprise. This is also the richest shape,
/// so it doubles as the superset record for every provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pull_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_branch_filter_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_branch_filter_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_pull_request_builds_for_existing_commits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pull_request_forks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_pull_request_fork_branch_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_commit_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_commit_status_per_step: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separate_pull_request_statuses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_blocked_as_pending: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitbucketSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pull_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_branch_filter_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_branch_filter_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_pull_request_builds_for_existing_commits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_commit_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_commit_status_per_step: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    GitHub(GitHubSettings),
    GitHubEnterprise(GitHubSettings),
    Bitbucket(BitbucketSettings),
    /// GitLab exposes no configurable settings.
    GitLab,
    /// Any other provider (`private`, `beanstalk`, ...), kept by id only.
    Other(String),
}

impl ProviderSettings {
    /// The `provider.id` this variant corresponds to.
    pub fn provider_id(&self) -> &str {
        match self {
            Self::GitHub(_) => "github",
            Self::GitHubEnterprise(_) => "github_enterprise",
            Self::Bitbucket(_) => "bitbucket",
            Self::GitLab => "gitlab",
            Self::Other(id) => id,
        }
    }

    /// Decode `provider.settings` for the given `provider.id`.
    ///
    /// Fields the provider reports but the variant doesn't model (repository,
    /// webhook details) are ignored.
    pub fn from_wire(provider_id: &str, settings: Option<Value>) -> Result<Self> {
        let settings = match settings {
            Some(Value::Null) | None => Value::Object(Default::default()),
            Some(value) => value,
        };

        Ok(match provider_id {
            "github" => Self::GitHub(serde_json::from_value(settings)?),
            "github_enterprise" => Self::GitHubEnterprise(serde_json::from_value(settings)?),
            "bitbucket" => Self::Bitbucket(serde_json::from_value(settings)?),
            "gitlab" => Self::GitLab,
            other => Self::Other(other.to_string()),
        })
    }

    /// The `provider_settings` payload for create/update, or `None` when the
    /// provider has nothing to configure.
    pub fn to_wire(&self) -> Result<Option<Value>> {
        Ok(match self {
            Self::GitHub(s) | Self::GitHubEnterprise(s) => Some(serde_json::to_value(s)?),
            Self::Bitbucket(s) => Some(serde_json::to_value(s)?),
            Self::GitLab | Self::Other(_) => None,
        })
    }

    /// Merge into the GitHub-shaped superset record. Fields that don't apply
    /// to this provider stay absent.
    pub fn superset(&self) -> GitHubSettings {
        match self {
            Self::GitHub(s) | Self::GitHubEnterprise(s) => s.clone(),
            Self::Bitbucket(s) => GitHubSettings {
                build_pull_requests: s.build_pull_requests,
                pull_request_branch_filter_enabled: s.pull_request_branch_filter_enabled,
                pull_request_branch_filter_configuration: s
                    .pull_request_branch_filter_configuration
                    .clone(),
                skip_pull_request_builds_for_existing_commits: s
                    .skip_pull_request_builds_for_existing_commits,
                build_tags: s.build_tags,
                publish_commit_status: s.publish_commit_status,
                publish_commit_status_per_step: s.publish_commit_status_per_step,
                ..GitHubSettings::default()
            },
            Self::GitLab | Self::Other(_) => GitHubSettings::default(),
        }
    }

    /// Narrow a superset record to the fields `provider_id` supports.
    pub fn from_superset(provider_id: &str, superset: GitHubSettings) -> Self {
        match provider_id {
            "github" => Self::GitHub(superset),
            "github_enterprise" => Self::GitHubEnterprise(superset),
            "bitbucket" => Self::Bitbucket(BitbucketSettings {
                build_pull_requests: superset.build_pull_requests,
                pull_request_branch_filter_enabled: superset.pull_request_branch_filter_enabled,
                pull_request_branch_filter_configuration: superset
                    .pull_request_branch_filter_configuration,
                skip_pull_request_builds_for_existing_commits: superset
                    .skip_pull_request_builds_for_existing_commits,
                build_tags: superset.build_tags,
                publish_commit_status: superset.publish_commit_status,
                publish_commit_status_per_step: superset.publish_commit_status_per_step,
            }),
            "gitlab" => Self::GitLab,
            other => Self::Other(other.to_string()),
        }
    }

    /// Render the settings as a flat string map.
    ///
    /// Absent settings are pruned; present booleans render as `"true"` or
    /// `"false"`, so an explicit `false` is kept.
    pub fn render(&self) -> SettingsMap {
        let s = self.superset();
        let mut map = SettingsMap::new();
        let mut text = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value.clone());
            }
        };
        text("trigger_mode", &s.trigger_mode);
        text(
            "pull_request_branch_filter_configuration",
            &s.pull_request_branch_filter_configuration,
        );
        text("filter_condition", &s.filter_condition);

        for (key, value) in bool_fields(&s) {
            if let Some(value) = value {
                map.insert(key.to_string(), value.to_string());
            }
        }
        map
    }

    /// Parse a flat string map, as produced by [`ProviderSettings::render`].
    ///
    /// Every key must be a setting `provider_id` supports. A GitHub-only key
    /// given for Bitbucket, or any key for GitLab, is a format error rather
    /// than being dropped.
    pub fn parse(provider_id: &str, map: &SettingsMap) -> Result<Self> {
        let mut s = GitHubSettings::default();
        for (key, value) in map {
            let flag = || parse_flag(key, value);
            match key.as_str() {
                "trigger_mode" => s.trigger_mode = Some(value.clone()),
                "pull_request_branch_filter_configuration" => {
                    s.pull_request_branch_filter_configuration = Some(value.clone())
                }
                "filter_condition" => s.filter_condition = Some(value.clone()),
                "build_pull_requests" => s.build_pull_requests = Some(flag()?),
                "pull_request_branch_filter_enabled" => {
                    s.pull_request_branch_filter_enabled = Some(flag()?)
                }
                "skip_pull_request_builds_for_existing_commits" => {
                    s.skip_pull_request_builds_for_existing_commits = Some(flag()?)
                }
                "build_pull_request_forks" => s.build_pull_request_forks = Some(flag()?),
                "prefix_pull_request_fork_branch_names" => {
                    s.prefix_pull_request_fork_branch_names = Some(flag()?)
                }
                "build_tags" => s.build_tags = Some(flag()?),
                "publish_commit_status" => s.publish_commit_status = Some(flag()?),
                "publish_commit_status_per_step" => {
                    s.publish_commit_status_per_step = Some(flag()?)
                }
                "filter_enabled" => s.filter_enabled = Some(flag()?),
                "separate_pull_request_statuses" => {
                    s.separate_pull_request_statuses = Some(flag()?)
                }
                "publish_blocked_as_pending" => s.publish_blocked_as_pending = Some(flag()?),
                _ => {
                    return Err(BuildkiteError::Format {
                        entry: key.clone(),
                        expected: "a known provider setting",
                    })
                }
            }
        }
        let settings = Self::from_superset(provider_id, s);
        let supported = settings.render();
        if let Some(key) = map.keys().find(|key| !supported.contains_key(*key)) {
            return Err(BuildkiteError::Format {
                entry: key.clone(),
                expected: "a setting the pipeline's provider supports",
            });
        }
        Ok(settings)
    }
}

fn bool_fields(s: &GitHubSettings) -> [(&'static str, Option<bool>); 11] {
    [
        ("build_pull_requests", s.build_pull_requests),
        (
            "pull_request_branch_filter_enabled",
            s.pull_request_branch_filter_enabled,
        ),
        (
            "skip_pull_request_builds_for_existing_commits",
            s.skip_pull_request_builds_for_existing_commits,
        ),
        ("build_pull_request_forks", s.build_pull_request_forks),
        (
            "prefix_pull_request_fork_branch_names",
            s.prefix_pull_request_fork_branch_names,
        ),
        ("build_tags", s.build_tags),
        ("publish_commit_status", s.publish_commit_status),
        (
            "publish_commit_status_per_step",
            s.publish_commit_status_per_step,
        ),
        ("filter_enabled", s.filter_enabled),
        (
            "separate_pull_request_statuses",
            s.separate_pull_request_statuses,
        ),
        ("publish_blocked_as_pending", s.publish_blocked_as_pending),
    ]
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| BuildkiteError::Format {
        entry: format!("{key}={value}"),
        expected: "'true' or 'false'",
    })
}
