use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::core::BuildkiteClient;
use super::documents;
use super::graphql::{expect_node, Connection, Edge, Input, NodeData, NodeRef};
use crate::codec::{env, optional};
use crate::error::{BuildkiteError, Result};
use crate::identity::NodeId;
use crate::types::PipelineSchedule;

/// Schedules fetched per pipeline in one page.
pub const SCHEDULES_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct ScheduleNode {
    id: NodeId,
    cronline: Option<String>,
    #[serde(default, deserialize_with = "env::deserialize_entries")]
    env: Vec<String>,
    enabled: Option<bool>,
    message: Option<String>,
    branch: Option<String>,
    commit: Option<String>,
    label: Option<String>,
    pipeline: Option<NodeRef>,
}

impl From<ScheduleNode> for PipelineSchedule {
    fn from(node: ScheduleNode) -> Self {
        Self {
            id: node.id,
            pipeline_id: node.pipeline.map(|p| p.id).unwrap_or_default(),
            cronline: optional::from_wire(node.cronline),
            env: node.env,
            enabled: optional::from_wire(node.enabled),
            message: optional::from_wire(node.message),
            branch: optional::from_wire(node.branch),
            commit: optional::from_wire(node.commit),
            label: optional::from_wire(node.label),
        }
    }
}

/// Fields shared by the create and update inputs. `env` goes out as one
/// newline separated blob.
#[derive(Debug, Serialize)]
struct ScheduleFields<'a> {
    label: &'a str,
    cronline: &'a str,
    message: &'a str,
    commit: &'a str,
    branch: &'a str,
    enabled: bool,
    env: String,
}

impl<'a> From<&'a PipelineSchedule> for ScheduleFields<'a> {
    fn from(ps: &'a PipelineSchedule) -> Self {
        Self {
            label: &ps.label,
            cronline: &ps.cronline,
            message: &ps.message,
            commit: &ps.commit,
            branch: &ps.branch,
            enabled: ps.enabled,
            env: env::encode_blob(&ps.env),
        }
    }
}

#[derive(Debug, Serialize)]
struct ScheduleCreateInput<'a> {
    #[serde(rename = "pipelineID")]
    pipeline_id: &'a NodeId,
    #[serde(flatten)]
    fields: ScheduleFields<'a>,
}

#[derive(Debug, Serialize)]
struct ScheduleUpdateInput<'a> {
    id: &'a NodeId,
    #[serde(flatten)]
    fields: ScheduleFields<'a>,
}

impl BuildkiteClient {
    /// All schedules of a pipeline, in server order. A pipeline without
    /// schedules yields an empty list.
    pub async fn read_pipeline_schedules(&self, pipeline_id: &NodeId) -> Result<Vec<PipelineSchedule>> {
        #[derive(Deserialize)]
        struct Pipeline {
            schedules: Option<Connection<ScheduleNode>>,
        }

        let data: NodeData = self
            .graphql
            .execute(
                "PipelineSchedules",
                documents::PIPELINE_SCHEDULE,
                json!({ "id": pipeline_id, "first": SCHEDULES_PAGE_SIZE }),
            )
            .await?;
        let pipeline: Pipeline = expect_node(data.node, "Pipeline", pipeline_id.as_str())?;

        Ok(pipeline
            .schedules
            .map(Connection::into_nodes)
            .unwrap_or_default()
            .into_iter()
            .map(PipelineSchedule::from)
            .collect())
    }

    pub async fn read_pipeline_schedule(&self, id: &NodeId) -> Result<PipelineSchedule> {
        let data: NodeData = self
            .graphql
            .execute(
                "PipelineSchedule",
                documents::PIPELINE_SCHEDULE,
                json!({ "id": id }),
            )
            .await?;
        let node: ScheduleNode = expect_node(data.node, "PipelineSchedule", id.as_str())?;
        Ok(node.into())
    }

    /// Create the schedule on `ps.pipeline_id` and attach the new id to `ps`.
    pub async fn create_pipeline_schedule(&self, ps: &mut PipelineSchedule) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            pipeline_schedule_create: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            pipeline_schedule_edge: Option<Edge<NodeRef>>,
        }

        let input = ScheduleCreateInput {
            pipeline_id: &ps.pipeline_id,
            fields: ScheduleFields::from(&*ps),
        };
        let data: Data = self
            .graphql
            .execute(
                "PipelineScheduleCreate",
                documents::PIPELINE_SCHEDULE,
                Input { input },
            )
            .await?;

        let id = data
            .pipeline_schedule_create
            .pipeline_schedule_edge
            .and_then(|edge| edge.node)
            .map(|node| node.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                BuildkiteError::Contract(format!(
                    "empty ID for pipeline schedule: {}",
                    ps.label
                ))
            })?;

        debug!("Created pipeline schedule {id}");
        ps.id = id;
        Ok(())
    }

    /// Overwrite the schedule `ps.id`, then replace `ps` with the server's
    /// representation.
    pub async fn update_pipeline_schedule(&self, ps: &mut PipelineSchedule) -> Result<()> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            pipeline_schedule_update: Payload,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            pipeline_schedule: Option<ScheduleNode>,
        }

        let input = ScheduleUpdateInput {
            id: &ps.id,
            fields: ScheduleFields::from(&*ps),
        };
        let data: Data = self
            .graphql
            .execute(
                "PipelineScheduleUpdate",
                documents::PIPELINE_SCHEDULE,
                Input { input },
            )
            .await?;

        let node = data
            .pipeline_schedule_update
            .pipeline_schedule
            .ok_or_else(|| BuildkiteError::NotFound {
                kind: "PipelineSchedule",
                id: ps.id.to_string(),
            })?;
        *ps = node.into();
        Ok(())
    }

    pub async fn delete_pipeline_schedule(&self, ps: &PipelineSchedule) -> Result<()> {
        let _: serde_json::Value = self
            .graphql
            .execute(
                "PipelineScheduleDelete",
                documents::PIPELINE_SCHEDULE,
                Input {
                    input: json!({ "id": ps.id }),
                },
            )
            .await?;
        Ok(())
    }
}
