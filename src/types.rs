use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::ProviderSettings;
use crate::identity::{NodeId, PipelineIdentity};

/// A Buildkite pipeline as managed through the REST API.
///
/// Optional attributes are `None` when they should stay off the wire on
/// create or update. Steps and env live inside `configuration` as one YAML
/// document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub identity: PipelineIdentity,
    pub name: String,
    /// Git repository URL
    pub repository: String,
    /// YAML pipeline configuration (steps and env)
    pub configuration: String,
    pub default_branch: Option<String>,
    pub description: Option<String>,
    /// Branch filter pattern limiting which branches build
    pub branch_configuration: Option<String>,
    pub skip_queued_branch_builds: Option<bool>,
    pub skip_queued_branch_builds_filter: Option<String>,
    pub cancel_running_branch_builds: Option<bool>,
    pub cancel_running_branch_builds_filter: Option<String>,
    pub provider: Option<ProviderSettings>,
    /// Read-only, set from server responses
    pub web_url: Option<String>,
    /// Read-only, set from server responses
    pub created_at: Option<DateTime<Utc>>,
}

/// A schedule of builds on a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSchedule {
    pub id: NodeId,
    /// Owning pipeline
    pub pipeline_id: NodeId,
    /// Cron expression (e.g., `0 0 1 1 *`)
    pub cronline: String,
    /// `KEY=value` entries, in order
    pub env: Vec<String>,
    pub enabled: bool,
    pub message: String,
    pub branch: String,
    pub commit: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Privacy {
    #[default]
    Visible,
    Secret,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Maintainer,
    #[default]
    Member,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: NodeId,
    pub name: String,
    pub privacy: Privacy,
    pub is_default_team: bool,
    pub default_member_role: MemberRole,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    ManageBuildAndRead,
    BuildAndRead,
    #[default]
    ReadOnly,
}

/// Association granting a team access to a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPipeline {
    pub id: NodeId,
    pub team_id: NodeId,
    pub pipeline_id: NodeId,
    pub access_level: AccessLevel,
}

/// A user's membership in a team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMember {
    pub id: NodeId,
    pub team_id: NodeId,
    pub user_id: NodeId,
}

/// An organization member. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: NodeId,
    pub name: String,
    pub email: String,
    pub uuid: String,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "VISIBLE",
            Self::Secret => "SECRET",
        }
    }
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintainer => "MAINTAINER",
            Self::Member => "MEMBER",
        }
    }
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageBuildAndRead => "MANAGE_BUILD_AND_READ",
            Self::BuildAndRead => "BUILD_AND_READ",
            Self::ReadOnly => "READ_ONLY",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::ManageBuildAndRead).unwrap(),
            r#""MANAGE_BUILD_AND_READ""#
        );
        assert_eq!(
            serde_json::from_str::<Privacy>(r#""SECRET""#).unwrap(),
            Privacy::Secret
        );
        assert_eq!(MemberRole::Maintainer.to_string(), "MAINTAINER");
        assert_eq!(AccessLevel::ReadOnly.to_string(), "READ_ONLY");
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        assert!(serde_json::from_str::<MemberRole>(r#""OWNER""#).is_err());
    }
}
