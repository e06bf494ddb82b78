use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::Lifecycle;
use crate::client::BuildkiteClient;
use crate::error::Result;
use crate::identity::NodeId;
use crate::types::{MemberRole, Privacy, Team};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    #[serde(default)]
    pub id: NodeId,
    pub name: String,
    pub privacy: Privacy,
    pub is_default_team: bool,
    pub default_member_role: MemberRole,
}

impl From<Team> for TeamState {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            privacy: team.privacy,
            is_default_team: team.is_default_team,
            default_member_role: team.default_member_role,
        }
    }
}

impl From<&TeamState> for Team {
    fn from(state: &TeamState) -> Self {
        Self {
            id: state.id.clone(),
            name: state.name.clone(),
            privacy: state.privacy,
            is_default_team: state.is_default_team,
            default_member_role: state.default_member_role,
        }
    }
}

pub struct TeamResource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> TeamResource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_team";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'c> Lifecycle for TeamResource<'c> {
    type State = TeamState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(&self, state: &mut TeamState) -> Result<()> {
        let mut team = Team::from(&*state);
        self.client.create_team(&mut team).await?;
        debug!("Team {} created as {}", state.name, team.id);

        *state = self.client.read_team(&team.id).await?.into();
        Ok(())
    }

    async fn read(&self, state: &mut TeamState) -> Result<()> {
        *state = self.client.read_team(&state.id).await?.into();
        Ok(())
    }

    async fn update(&self, state: &mut TeamState) -> Result<()> {
        let mut team = Team::from(&*state);
        self.client.update_team(&mut team).await?;
        *state = team.into();
        Ok(())
    }

    async fn delete(&self, state: &TeamState) -> Result<()> {
        self.client.delete_team(&Team::from(state)).await
    }

    /// Import by team name.
    async fn import(&self, key: &str) -> Result<TeamState> {
        Ok(self.client.read_team_by_name(key).await?.into())
    }
}
