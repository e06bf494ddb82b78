use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::core::BuildkiteClient;
use super::documents;
use super::graphql::{expect_node, Edge, Input, NodeData};
use crate::error::{BuildkiteError, Result};
use crate::identity::{NodeId, Slug};
use crate::types::{MemberRole, Privacy, Team};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamNode {
    id: NodeId,
    name: String,
    privacy: Privacy,
    #[serde(default)]
    is_default_team: bool,
    default_member_role: MemberRole,
}

impl From<TeamNode> for Team {
    fn from(node: TeamNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            privacy: node.privacy,
            is_default_team: node.is_default_team,
            default_member_role: node.default_member_role,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamFields<'a> {
    name: &'a str,
    privacy: Privacy,
    is_default_team: bool,
    default_member_role: MemberRole,
}

impl<'a> From<&'a Team> for TeamFields<'a> {
    fn from(team: &'a Team) -> Self {
        Self {
            name: &team.name,
            privacy: team.privacy,
            is_default_team: team.is_default_team,
            default_member_role: team.default_member_role,
        }
    }
}

#[derive(Debug, Serialize)]
struct TeamCreateInput<'a> {
    #[serde(rename = "organizationID")]
    organization_id: &'a NodeId,
    #[serde(flatten)]
    fields: TeamFields<'a>,
}

#[derive(Debug, Serialize)]
struct TeamUpdateInput<'a> {
    id: &'a NodeId,
    #[serde(flatten)]
    fields: TeamFields<'a>,
}

impl BuildkiteClient {
    /// Create `team` in the organization and attach the new id to it.
    pub async fn create_team(&self, team: &mut Team) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_create: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            team_edge: Option<Edge<TeamNode>>,
        }

        let input = TeamCreateInput {
            organization_id: self.org.id(),
            fields: TeamFields::from(&*team),
        };
        let data: Data = self
            .graphql
            .execute("TeamCreate", documents::TEAM, Input { input })
            .await?;

        let id = data
            .team_create
            .team_edge
            .and_then(|edge| edge.node)
            .map(|node| node.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BuildkiteError::Contract(format!("empty ID for team: {}", team.name)))?;

        debug!("Created team {id}");
        team.id = id;
        Ok(())
    }

    pub async fn read_team(&self, id: &NodeId) -> Result<Team> {
        let data: NodeData = self
            .graphql
            .execute("Team", documents::TEAM, json!({ "id": id }))
            .await?;
        let node: TeamNode = expect_node(data.node, "Team", id.as_str())?;
        Ok(node.into())
    }

    /// Look a team up by its organization-scoped slug instead of its id.
    pub async fn read_team_by_name(&self, name: &str) -> Result<Team> {
        #[derive(Deserialize)]
        struct Data {
            team: Option<TeamNode>,
        }

        let slug = Slug::new(name).qualified(self.org.slug());
        let data: Data = self
            .graphql
            .execute("TeamBySlug", documents::TEAM, json!({ "slug": slug }))
            .await?;

        data.team
            .map(Team::from)
            .ok_or_else(|| BuildkiteError::NotFound {
                kind: "Team",
                id: slug,
            })
    }

    /// Overwrite the team `team.id`, then replace `team` with the server's
    /// representation.
    pub async fn update_team(&self, team: &mut Team) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_update: Payload,
        }
        #[derive(Deserialize)]
        struct Payload {
            team: Option<TeamNode>,
        }

        let input = TeamUpdateInput {
            id: &team.id,
            fields: TeamFields::from(&*team),
        };
        let data: Data = self
            .graphql
            .execute("TeamUpdate", documents::TEAM, Input { input })
            .await?;

        let node = data.team_update.team.ok_or_else(|| BuildkiteError::NotFound {
            kind: "Team",
            id: team.id.to_string(),
        })?;
        *team = node.into();
        Ok(())
    }

    pub async fn delete_team(&self, team: &Team) -> Result<()> {
        let _: serde_json::Value = self
            .graphql
            .execute(
                "TeamDelete",
                documents::TEAM,
                Input {
                    input: json!({ "id": team.id }),
                },
            )
            .await?;
        Ok(())
    }
}
