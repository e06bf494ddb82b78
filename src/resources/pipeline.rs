use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::Lifecycle;
use crate::client::BuildkiteClient;
use crate::codec::{optional, ProviderSettings, SettingsMap};
use crate::error::Result;
use crate::identity::{NodeId, PipelineIdentity, Slug};
use crate::types::Pipeline;

/// Provider assumed for settings declared before the pipeline exists.
const DEFAULT_PROVIDER: &str = "github";

/// Engine-facing pipeline state.
///
/// `id` is the GraphQL node id, so other resources can reference the
/// pipeline by it. `slug` is what REST calls use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    #[serde(default)]
    pub id: NodeId,
    #[serde(default)]
    pub slug: Slug,
    pub name: String,
    pub repository: String,
    /// YAML steps, sent as the pipeline configuration
    pub steps: String,
    pub branch_configuration: Option<String>,
    pub cancel_running_branch_builds: Option<bool>,
    pub cancel_running_branch_builds_filter: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
    pub skip_queued_branch_builds: Option<bool>,
    pub skip_queued_branch_builds_filter: Option<String>,
    #[serde(default)]
    pub provider_settings: SettingsMap,
    /// Source provider reported by the server (e.g., `github`, `bitbucket`)
    #[serde(default)]
    pub provider_id: Option<String>,
}

impl PipelineState {
    fn to_pipeline(&self) -> Result<Pipeline> {
        let provider = if self.provider_settings.is_empty() {
            None
        } else {
            let provider_id = self.provider_id.as_deref().unwrap_or(DEFAULT_PROVIDER);
            Some(ProviderSettings::parse(provider_id, &self.provider_settings)?)
        };

        Ok(Pipeline {
            identity: PipelineIdentity::from_slug(self.slug.clone()),
            name: self.name.clone(),
            repository: self.repository.clone(),
            configuration: self.steps.clone(),
            default_branch: self.default_branch.clone(),
            description: self.description.clone(),
            branch_configuration: self.branch_configuration.clone(),
            skip_queued_branch_builds: self.skip_queued_branch_builds,
            skip_queued_branch_builds_filter: self.skip_queued_branch_builds_filter.clone(),
            cancel_running_branch_builds: self.cancel_running_branch_builds,
            cancel_running_branch_builds_filter: self.cancel_running_branch_builds_filter.clone(),
            provider,
            ..Pipeline::default()
        })
    }

    /// Overwrite every visible field from a server-side pipeline.
    fn apply(&mut self, pipeline: Pipeline) {
        self.slug = pipeline.identity.slug;
        self.name = pipeline.name;
        self.repository = pipeline.repository;
        self.steps = pipeline.configuration;
        self.branch_configuration = optional::populate(pipeline.branch_configuration);
        self.cancel_running_branch_builds = optional::populate(pipeline.cancel_running_branch_builds);
        self.cancel_running_branch_builds_filter =
            optional::populate(pipeline.cancel_running_branch_builds_filter);
        self.default_branch = optional::populate(pipeline.default_branch);
        self.description = optional::populate(pipeline.description);
        self.skip_queued_branch_builds = optional::populate(pipeline.skip_queued_branch_builds);
        self.skip_queued_branch_builds_filter =
            optional::populate(pipeline.skip_queued_branch_builds_filter);
        self.provider_id = pipeline.provider.as_ref().map(|p| p.provider_id().to_string());
        self.provider_settings = pipeline
            .provider
            .as_ref()
            .map(ProviderSettings::render)
            .unwrap_or_default();
    }
}

pub struct PipelineResource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> PipelineResource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_pipeline";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'c> Lifecycle for PipelineResource<'c> {
    type State = PipelineState;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    async fn create(&self, state: &mut PipelineState) -> Result<()> {
        let mut pipeline = state.to_pipeline()?;
        self.client.create_pipeline(&mut pipeline).await?;
        debug!("Pipeline {} created as {}", state.name, pipeline.identity.slug);

        let mut created = state.clone();
        created.slug = pipeline.identity.slug;
        self.read(&mut created).await?;
        *state = created;
        Ok(())
    }

    async fn read(&self, state: &mut PipelineState) -> Result<()> {
        let mut scope = self.client.pipeline_scope(state.slug.clone());
        let pipeline = self.client.read_pipeline(scope.slug()).await?;
        let id = scope.node_id().await?;

        state.id = id;
        state.apply(pipeline);
        Ok(())
    }

    async fn update(&self, state: &mut PipelineState) -> Result<()> {
        let mut pipeline = state.to_pipeline()?;
        self.client.update_pipeline(&mut pipeline).await?;
        state.apply(pipeline);
        Ok(())
    }

    async fn delete(&self, state: &PipelineState) -> Result<()> {
        let pipeline = Pipeline {
            identity: PipelineIdentity::from_slug(state.slug.clone()),
            ..Pipeline::default()
        };
        self.client.delete_pipeline(&pipeline).await
    }

    /// Import by pipeline slug.
    async fn import(&self, key: &str) -> Result<PipelineState> {
        let mut state = PipelineState {
            slug: Slug::from(key),
            ..PipelineState::default()
        };
        self.read(&mut state).await?;
        Ok(state)
    }
}
