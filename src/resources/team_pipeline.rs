use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::Lifecycle;
use crate::client::BuildkiteClient;
use crate::error::Result;
use crate::identity::NodeId;
use crate::types::{AccessLevel, TeamPipeline};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPipelineState {
    #[serde(default)]
    pub id: NodeId,
    pub team_id: NodeId,
    pub pipeline_id: NodeId,
    pub access_level: AccessLevel,
}

impl From<TeamPipeline> for TeamPipelineState {
    fn from(tp: TeamPipeline) -> Self {
        Self {
            id: tp.id,
            team_id: tp.team_id,
            pipeline_id: tp.pipeline_id,
            access_level: tp.access_level,
        }
    }
}

impl From<&TeamPipelineState> for TeamPipeline {
    fn from(state: &TeamPipelineState) -> Self {
        Self {
            id: state.id.clone(),
            team_id: state.team_id.clone(),
            pipeline_id: state.pipeline_id.clone(),
            access_level: state.access_level,
        }
    }
}

pub struct TeamPipelineResource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> TeamPipelineResource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_team_pipeline";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'c> Lifecycle for TeamPipelineResource<'c> {
    type State = TeamPipelineState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(&self, state: &mut TeamPipelineState) -> Result<()> {
        let mut tp = TeamPipeline::from(&*state);
        self.client.create_team_pipeline(&mut tp).await?;
        debug!(
            "Team {} granted {} on pipeline {}",
            tp.team_id, tp.access_level, tp.pipeline_id
        );

        *state = self.client.read_team_pipeline(&tp.id).await?.into();
        Ok(())
    }

    async fn read(&self, state: &mut TeamPipelineState) -> Result<()> {
        *state = self.client.read_team_pipeline(&state.id).await?.into();
        Ok(())
    }

    async fn update(&self, state: &mut TeamPipelineState) -> Result<()> {
        let mut tp = TeamPipeline::from(&*state);
        self.client.update_team_pipeline(&mut tp).await?;
        *state = tp.into();
        Ok(())
    }

    async fn delete(&self, state: &TeamPipelineState) -> Result<()> {
        self.client
            .delete_team_pipeline(&TeamPipeline::from(state))
            .await
    }

    /// Import by team pipeline node id.
    async fn import(&self, key: &str) -> Result<TeamPipelineState> {
        Ok(self
            .client
            .read_team_pipeline(&NodeId::from(key))
            .await?
            .into())
    }
}
