use super::core::BuildkiteClient;
use crate::error::Result;
use crate::identity::{NodeId, Slug};

/// Resolution context for one logical operation on a pipeline.
///
/// The GraphQL id is looked up from the slug on first use and reused until
/// the scope is dropped. Scopes are not meant to outlive the operation that
/// created them; a new operation starts a new scope and resolves again.
pub struct PipelineScope<'c> {
    client: &'c BuildkiteClient,
    slug: Slug,
    node_id: Option<NodeId>,
}

impl<'c> PipelineScope<'c> {
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub async fn node_id(&mut self) -> Result<NodeId> {
        if let Some(id) = &self.node_id {
            return Ok(id.clone());
        }
        let id = self.client.resolve_pipeline_id(&self.slug).await?;
        self.node_id = Some(id.clone());
        Ok(id)
    }
}

impl BuildkiteClient {
    pub fn pipeline_scope(&self, slug: Slug) -> PipelineScope<'_> {
        PipelineScope {
            client: self,
            slug,
            node_id: None,
        }
    }
}
