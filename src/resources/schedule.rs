use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::Lifecycle;
use crate::client::BuildkiteClient;
use crate::codec::env::{self, EnvMap};
use crate::error::Result;
use crate::identity::NodeId;
use crate::types::PipelineSchedule;

/// Engine-facing schedule state. `env` is a map here and an ordered
/// `KEY=value` list on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineScheduleState {
    #[serde(default)]
    pub id: NodeId,
    pub pipeline_id: NodeId,
    pub cronline: String,
    #[serde(default)]
    pub env: EnvMap,
    pub enabled: bool,
    pub message: String,
    pub branch: String,
    pub commit: String,
    pub label: String,
}

impl PipelineScheduleState {
    fn to_schedule(&self) -> Result<PipelineSchedule> {
        Ok(PipelineSchedule {
            id: self.id.clone(),
            pipeline_id: self.pipeline_id.clone(),
            cronline: self.cronline.clone(),
            env: env::flatten_map(&self.env)?,
            enabled: self.enabled,
            message: self.message.clone(),
            branch: self.branch.clone(),
            commit: self.commit.clone(),
            label: self.label.clone(),
        })
    }

    fn apply(&mut self, schedule: PipelineSchedule) -> Result<()> {
        self.env = env::expand_list(&schedule.env)?;
        self.id = schedule.id;
        if !schedule.pipeline_id.is_empty() {
            self.pipeline_id = schedule.pipeline_id;
        }
        self.cronline = schedule.cronline;
        self.enabled = schedule.enabled;
        self.message = schedule.message;
        self.branch = schedule.branch;
        self.commit = schedule.commit;
        self.label = schedule.label;
        Ok(())
    }
}

pub struct PipelineScheduleResource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> PipelineScheduleResource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_pipeline_schedule";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'c> Lifecycle for PipelineScheduleResource<'c> {
    type State = PipelineScheduleState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(&self, state: &mut PipelineScheduleState) -> Result<()> {
        let mut schedule = state.to_schedule()?;
        self.client.create_pipeline_schedule(&mut schedule).await?;
        debug!("Pipeline schedule {} created as {}", state.label, schedule.id);

        let mut created = state.clone();
        created.id = schedule.id;
        self.read(&mut created).await?;
        *state = created;
        Ok(())
    }

    async fn read(&self, state: &mut PipelineScheduleState) -> Result<()> {
        let schedule = self.client.read_pipeline_schedule(&state.id).await?;
        state.apply(schedule)
    }

    async fn update(&self, state: &mut PipelineScheduleState) -> Result<()> {
        let mut schedule = state.to_schedule()?;
        self.client.update_pipeline_schedule(&mut schedule).await?;
        state.apply(schedule)
    }

    async fn delete(&self, state: &PipelineScheduleState) -> Result<()> {
        let schedule = PipelineSchedule {
            id: state.id.clone(),
            pipeline_id: state.pipeline_id.clone(),
            ..PipelineSchedule::default()
        };
        self.client.delete_pipeline_schedule(&schedule).await
    }

    /// Import by schedule node id.
    async fn import(&self, key: &str) -> Result<PipelineScheduleState> {
        let mut state = PipelineScheduleState {
            id: NodeId::from(key),
            ..PipelineScheduleState::default()
        };
        self.read(&mut state).await?;
        Ok(state)
    }
}
