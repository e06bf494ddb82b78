use chrono::{DateTime, Utc};
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::core::BuildkiteClient;
use super::documents;
use super::rest::Target;
use crate::codec::{optional, ProviderSettings};
use crate::error::{BuildkiteError, Result};
use crate::identity::{NodeId, PipelineIdentity, RestId, Slug};
use crate::types::Pipeline;

/// Pipeline as returned by the REST API.
#[derive(Debug, Deserialize)]
struct PipelineResponse {
    id: Option<String>,
    slug: Option<String>,
    name: Option<String>,
    repository: Option<String>,
    configuration: Option<String>,
    default_branch: Option<String>,
    description: Option<String>,
    branch_configuration: Option<String>,
    skip_queued_branch_builds: Option<bool>,
    skip_queued_branch_builds_filter: Option<String>,
    cancel_running_branch_builds: Option<bool>,
    cancel_running_branch_builds_filter: Option<String>,
    provider: Option<ProviderResponse>,
    web_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    id: String,
    settings: Option<Value>,
}

impl PipelineResponse {
    fn into_pipeline(self) -> Result<Pipeline> {
        let provider = self
            .provider
            .map(|p| ProviderSettings::from_wire(&p.id, p.settings))
            .transpose()?;

        Ok(Pipeline {
            identity: PipelineIdentity {
                slug: Slug::new(optional::from_wire(self.slug)),
                rest_id: self.id.filter(|id| !id.is_empty()).map(RestId::new),
            },
            name: optional::from_wire(self.name),
            repository: optional::from_wire(self.repository),
            configuration: optional::from_wire(self.configuration),
            default_branch: self.default_branch,
            description: self.description,
            branch_configuration: self.branch_configuration,
            skip_queued_branch_builds: self.skip_queued_branch_builds,
            skip_queued_branch_builds_filter: self.skip_queued_branch_builds_filter,
            cancel_running_branch_builds: self.cancel_running_branch_builds,
            cancel_running_branch_builds_filter: self.cancel_running_branch_builds_filter,
            provider,
            web_url: self.web_url,
            created_at: self.created_at,
        })
    }
}

/// Body for create and update. Steps, env and team uuids are deliberately
/// never sent: steps and env live in `configuration`, teams are attached
/// through team pipelines.
#[derive(Debug, Serialize)]
struct PipelinePayload<'a> {
    name: &'a str,
    repository: &'a str,
    configuration: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch_configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_queued_branch_builds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_queued_branch_builds_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancel_running_branch_builds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancel_running_branch_builds_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider_settings: Option<Value>,
}

impl<'a> PipelinePayload<'a> {
    fn from_pipeline(p: &'a Pipeline) -> Result<Self> {
        let provider_settings = match &p.provider {
            Some(provider) => provider.to_wire()?,
            None => None,
        };

        Ok(Self {
            name: &p.name,
            repository: &p.repository,
            configuration: &p.configuration,
            default_branch: optional::to_wire(&p.default_branch),
            description: optional::to_wire(&p.description),
            branch_configuration: optional::to_wire(&p.branch_configuration),
            skip_queued_branch_builds: optional::to_wire(&p.skip_queued_branch_builds),
            skip_queued_branch_builds_filter: optional::to_wire(
                &p.skip_queued_branch_builds_filter,
            ),
            cancel_running_branch_builds: optional::to_wire(&p.cancel_running_branch_builds),
            cancel_running_branch_builds_filter: optional::to_wire(
                &p.cancel_running_branch_builds_filter,
            ),
            provider_settings,
        })
    }
}

impl BuildkiteClient {
    fn pipelines_path(&self) -> String {
        format!("organizations/{}/pipelines", self.org.slug())
    }

    fn pipeline_path(&self, slug: &Slug) -> String {
        format!("{}/{}", self.pipelines_path(), slug)
    }

    /// Resolve the GraphQL node id of the pipeline with the given slug.
    ///
    /// Never cached; see [`super::PipelineScope`] for reuse within a single
    /// operation.
    pub async fn resolve_pipeline_id(&self, slug: &Slug) -> Result<NodeId> {
        #[derive(Deserialize)]
        struct Data {
            pipeline: Option<super::graphql::NodeRef>,
        }

        let data: Data = self
            .graphql
            .execute(
                "PipelineId",
                documents::PIPELINE,
                json!({ "slug": slug.qualified(self.org.slug()) }),
            )
            .await?;

        data.pipeline
            .map(|p| p.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BuildkiteError::NotFound {
                kind: "Pipeline",
                id: slug.to_string(),
            })
    }

    /// Create a pipeline and attach the server-assigned slug and REST id to
    /// `pipeline`. Nothing else in `pipeline` is touched.
    ///
    /// # Errors
    ///
    /// Returns [`BuildkiteError::Contract`] if the server accepts the
    /// pipeline but returns no id or slug; `pipeline` is left unchanged.
    pub async fn create_pipeline(&self, pipeline: &mut Pipeline) -> Result<()> {
        let payload = PipelinePayload::from_pipeline(pipeline)?;
        let created: PipelineResponse = self
            .rest
            .send_json(
                Method::POST,
                &self.pipelines_path(),
                Some(&payload),
                Target {
                    kind: "Organization",
                    id: self.org.slug().as_str(),
                },
            )
            .await?;

        let rest_id = created.id.filter(|id| !id.is_empty());
        let slug = created.slug.filter(|slug| !slug.is_empty());
        let (Some(rest_id), Some(slug)) = (rest_id, slug) else {
            return Err(BuildkiteError::Contract(format!(
                "nil ID for pipeline: {}",
                pipeline.name
            )));
        };

        debug!("Created pipeline {slug} ({rest_id})");
        pipeline.identity = PipelineIdentity {
            slug: Slug::new(slug),
            rest_id: Some(RestId::new(rest_id)),
        };
        Ok(())
    }

    pub async fn read_pipeline(&self, slug: &Slug) -> Result<Pipeline> {
        let response: PipelineResponse = self
            .rest
            .send_json::<(), _>(
                Method::GET,
                &self.pipeline_path(slug),
                None,
                Target {
                    kind: "Pipeline",
                    id: slug.as_str(),
                },
            )
            .await?;
        response.into_pipeline()
    }

    /// Overwrite the pipeline identified by `pipeline.identity.slug`, then
    /// replace `pipeline` with the server's representation.
    pub async fn update_pipeline(&self, pipeline: &mut Pipeline) -> Result<()> {
        let slug = pipeline.identity.slug.clone();
        let payload = PipelinePayload::from_pipeline(pipeline)?;
        let updated: PipelineResponse = self
            .rest
            .send_json(
                Method::PATCH,
                &self.pipeline_path(&slug),
                Some(&payload),
                Target {
                    kind: "Pipeline",
                    id: slug.as_str(),
                },
            )
            .await?;

        *pipeline = updated.into_pipeline()?;
        Ok(())
    }

    pub async fn delete_pipeline(&self, pipeline: &Pipeline) -> Result<()> {
        let slug = &pipeline.identity.slug;
        self.rest
            .send_empty(
                Method::DELETE,
                &self.pipeline_path(slug),
                Target {
                    kind: "Pipeline",
                    id: slug.as_str(),
                },
            )
            .await
    }
}
