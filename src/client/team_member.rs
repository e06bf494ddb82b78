use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::core::BuildkiteClient;
use super::documents;
use super::graphql::{expect_node, Edge, Input, NodeData, NodeRef};
use crate::error::{BuildkiteError, Result};
use crate::identity::NodeId;
use crate::types::TeamMember;

#[derive(Debug, Deserialize)]
struct TeamMemberNode {
    id: NodeId,
    user: Option<NodeRef>,
    team: Option<NodeRef>,
}

#[derive(Debug, Serialize)]
struct TeamMemberCreateInput<'a> {
    #[serde(rename = "userID")]
    user_id: &'a NodeId,
    #[serde(rename = "teamID")]
    team_id: &'a NodeId,
}

impl BuildkiteClient {
    /// Add `member.user_id` to `member.team_id` and attach the membership id
    /// to `member`.
    pub async fn create_team_member(&self, member: &mut TeamMember) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_member_create: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            team_member_edge: Option<Edge<NodeRef>>,
        }

        let input = TeamMemberCreateInput {
            user_id: &member.user_id,
            team_id: &member.team_id,
        };
        let data: Data = self
            .graphql
            .execute("TeamMemberCreate", documents::TEAM_MEMBER, Input { input })
            .await?;

        let id = data
            .team_member_create
            .team_member_edge
            .and_then(|edge| edge.node)
            .map(|node| node.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                BuildkiteError::Contract(format!(
                    "empty ID for team member: user {} in team {}",
                    member.user_id, member.team_id
                ))
            })?;

        debug!("Created team member {id}");
        member.id = id;
        Ok(())
    }

    pub async fn read_team_member(&self, id: &NodeId) -> Result<TeamMember> {
        let data: NodeData = self
            .graphql
            .execute("TeamMember", documents::TEAM_MEMBER, json!({ "id": id }))
            .await?;
        let node: TeamMemberNode = expect_node(data.node, "TeamMember", id.as_str())?;

        Ok(TeamMember {
            id: node.id,
            team_id: node.team.map(|t| t.id).unwrap_or_default(),
            user_id: node.user.map(|u| u.id).unwrap_or_default(),
        })
    }

    pub async fn delete_team_member(&self, member: &TeamMember) -> Result<()> {
        let _: serde_json::Value = self
            .graphql
            .execute(
                "TeamMemberDelete",
                documents::TEAM_MEMBER,
                Input {
                    input: json!({ "id": member.id }),
                },
            )
            .await?;
        Ok(())
    }
}
