use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::Lifecycle;
use crate::client::BuildkiteClient;
use crate::error::Result;
use crate::identity::NodeId;
use crate::types::TeamMember;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberState {
    #[serde(default)]
    pub id: NodeId,
    pub team_id: NodeId,
    pub user_id: NodeId,
}

impl From<TeamMember> for TeamMemberState {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            team_id: member.team_id,
            user_id: member.user_id,
        }
    }
}

impl From<&TeamMemberState> for TeamMember {
    fn from(state: &TeamMemberState) -> Self {
        Self {
            id: state.id.clone(),
            team_id: state.team_id.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

pub struct TeamMemberResource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> TeamMemberResource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_team_member";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'c> Lifecycle for TeamMemberResource<'c> {
    type State = TeamMemberState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(&self, state: &mut TeamMemberState) -> Result<()> {
        let mut member = TeamMember::from(&*state);
        self.client.create_team_member(&mut member).await?;
        debug!("User {} added to team {}", member.user_id, member.team_id);

        *state = self.client.read_team_member(&member.id).await?.into();
        Ok(())
    }

    async fn read(&self, state: &mut TeamMemberState) -> Result<()> {
        *state = self.client.read_team_member(&state.id).await?.into();
        Ok(())
    }

    /// Memberships can't be edited in place. A changed user or team replaces
    /// the membership; anything else is a plain read-back.
    async fn update(&self, state: &mut TeamMemberState) -> Result<()> {
        let current = self.client.read_team_member(&state.id).await?;
        if current.team_id == state.team_id && current.user_id == state.user_id {
            *state = current.into();
            return Ok(());
        }

        debug!(
            "Replacing team member {}: user {} in team {}",
            current.id, state.user_id, state.team_id
        );
        self.client.delete_team_member(&current).await?;

        let mut member = TeamMember {
            id: NodeId::default(),
            team_id: state.team_id.clone(),
            user_id: state.user_id.clone(),
        };
        self.client.create_team_member(&mut member).await?;
        *state = self.client.read_team_member(&member.id).await?.into();
        Ok(())
    }

    async fn delete(&self, state: &TeamMemberState) -> Result<()> {
        self.client
            .delete_team_member(&TeamMember::from(state))
            .await
    }

    /// Import by team member node id.
    async fn import(&self, key: &str) -> Result<TeamMemberState> {
        Ok(self
            .client
            .read_team_member(&NodeId::from(key))
            .await?
            .into())
    }
}
