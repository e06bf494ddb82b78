use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::core::BuildkiteClient;
use super::documents;
use super::graphql::{expect_node, Connection, Edge, Input, NodeData, NodeRef};
use crate::error::{BuildkiteError, Result};
use crate::identity::NodeId;
use crate::types::{AccessLevel, TeamPipeline};

/// Team associations fetched per pipeline in one page.
pub const TEAM_PIPELINES_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamPipelineNode {
    id: NodeId,
    access_level: AccessLevel,
    team: Option<NodeRef>,
    pipeline: Option<NodeRef>,
}

impl From<TeamPipelineNode> for TeamPipeline {
    fn from(node: TeamPipelineNode) -> Self {
        Self {
            id: node.id,
            team_id: node.team.map(|t| t.id).unwrap_or_default(),
            pipeline_id: node.pipeline.map(|p| p.id).unwrap_or_default(),
            access_level: node.access_level,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamPipelineCreateInput<'a> {
    #[serde(rename = "teamID")]
    team_id: &'a NodeId,
    #[serde(rename = "pipelineID")]
    pipeline_id: &'a NodeId,
    access_level: AccessLevel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamPipelineUpdateInput<'a> {
    id: &'a NodeId,
    access_level: AccessLevel,
}

#[derive(Debug, Serialize)]
struct TeamPipelineDeleteInput<'a> {
    id: &'a NodeId,
    force: bool,
}

impl BuildkiteClient {
    /// Every team association of a pipeline, in server order.
    pub async fn read_team_pipelines(&self, pipeline_id: &NodeId) -> Result<Vec<TeamPipeline>> {
        #[derive(Deserialize)]
        struct Pipeline {
            teams: Option<Connection<TeamPipelineNode>>,
        }

        let data: NodeData = self
            .graphql
            .execute(
                "TeamPipelines",
                documents::TEAM_PIPELINE,
                json!({ "id": pipeline_id, "first": TEAM_PIPELINES_PAGE_SIZE }),
            )
            .await?;
        let pipeline: Pipeline = expect_node(data.node, "Pipeline", pipeline_id.as_str())?;

        Ok(pipeline
            .teams
            .map(Connection::into_nodes)
            .unwrap_or_default()
            .into_iter()
            .map(TeamPipeline::from)
            .collect())
    }

    pub async fn read_team_pipeline(&self, id: &NodeId) -> Result<TeamPipeline> {
        let data: NodeData = self
            .graphql
            .execute("TeamPipeline", documents::TEAM_PIPELINE, json!({ "id": id }))
            .await?;
        let node: TeamPipelineNode = expect_node(data.node, "TeamPipeline", id.as_str())?;
        Ok(node.into())
    }

    /// Grant `tp.team_id` access to `tp.pipeline_id` and attach the new
    /// association id to `tp`.
    pub async fn create_team_pipeline(&self, tp: &mut TeamPipeline) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_pipeline_create: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            team_pipeline_edge: Option<Edge<NodeRef>>,
        }

        let input = TeamPipelineCreateInput {
            team_id: &tp.team_id,
            pipeline_id: &tp.pipeline_id,
            access_level: tp.access_level,
        };
        let data: Data = self
            .graphql
            .execute("TeamPipelineCreate", documents::TEAM_PIPELINE, Input { input })
            .await?;

        let id = data
            .team_pipeline_create
            .team_pipeline_edge
            .and_then(|edge| edge.node)
            .map(|node| node.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                BuildkiteError::Contract(format!(
                    "empty ID for team pipeline: team {} on pipeline {}",
                    tp.team_id, tp.pipeline_id
                ))
            })?;

        debug!("Created team pipeline {id}");
        tp.id = id;
        Ok(())
    }

    /// Change the access level of `tp.id`, then replace `tp` with the
    /// server's representation.
    pub async fn update_team_pipeline(&self, tp: &mut TeamPipeline) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            team_pipeline_update: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            team_pipeline: Option<TeamPipelineNode>,
        }

        let input = TeamPipelineUpdateInput {
            id: &tp.id,
            access_level: tp.access_level,
        };
        let data: Data = self
            .graphql
            .execute("TeamPipelineUpdate", documents::TEAM_PIPELINE, Input { input })
            .await?;

        let node = data
            .team_pipeline_update
            .team_pipeline
            .ok_or_else(|| BuildkiteError::NotFound {
                kind: "TeamPipeline",
                id: tp.id.to_string(),
            })?;
        *tp = node.into();
        Ok(())
    }

    /// Remove the association. Never forced.
    pub async fn delete_team_pipeline(&self, tp: &TeamPipeline) -> Result<()> {
        let input = TeamPipelineDeleteInput {
            id: &tp.id,
            force: false,
        };
        let _: serde_json::Value = self
            .graphql
            .execute("TeamPipelineDelete", documents::TEAM_PIPELINE, Input { input })
            .await?;
        Ok(())
    }
}
