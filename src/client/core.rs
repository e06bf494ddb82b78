use log::debug;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::documents;
use super::graphql::GraphQLApi;
use super::rest::RestApi;
use crate::auth::Token;
use crate::config::BuildkiteConfig;
use crate::error::{BuildkiteError, Result};
use crate::identity::{NodeId, Organization, Slug};
use crate::transport::AuthenticatedTransport;

/// Client for one Buildkite organization, talking to both the REST and the
/// GraphQL API.
///
/// Construction validates the token and resolves the organization's node id
/// once. Nothing else is cached: every other identifier is resolved per call.
pub struct BuildkiteClient {
    pub(super) rest: RestApi,
    pub(super) graphql: GraphQLApi,
    pub(super) org: Organization,
}

impl BuildkiteClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The organization slug or API token is missing
    /// * Either endpoint URL is invalid
    /// * The token fails the access-token check
    /// * The organization cannot be resolved
    pub async fn connect(config: &BuildkiteConfig) -> Result<Self> {
        let org = config
            .organization_slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BuildkiteError::Config("organization slug is required".into()))?;
        let token = config
            .api_token
            .as_deref()
            .ok_or_else(|| BuildkiteError::Config("API token is required".into()))?;

        Self::new(
            org,
            Token::from(token),
            &config.rest_base_url,
            &config.graphql_base_url,
        )
        .await
    }

    pub async fn new(
        org_slug: &str,
        token: Token,
        rest_base_url: &str,
        graphql_url: &str,
    ) -> Result<Self> {
        let transport = AuthenticatedTransport::new(&token)?;

        // Joins against the REST base must stay under its version segment.
        let rest_url = Url::parse(&format!("{}/", rest_base_url.trim_end_matches('/')))
            .map_err(|e| BuildkiteError::Config(format!("Invalid REST base URL: {e}")))?;
        let graphql_url = Url::parse(graphql_url)
            .map_err(|e| BuildkiteError::Config(format!("Invalid GraphQL URL: {e}")))?;

        transport.check_auth(&rest_url).await?;

        let rest = RestApi::new(transport.client().clone(), rest_url);
        let graphql = GraphQLApi::new(transport.client().clone(), graphql_url);

        let slug = Slug::new(org_slug);
        let org_id = resolve_organization_id(&graphql, &slug).await?;
        debug!("Resolved organization {slug} to {org_id}");

        Ok(Self {
            rest,
            graphql,
            org: Organization::new(slug, org_id),
        })
    }

    pub fn organization(&self) -> &Organization {
        &self.org
    }
}

async fn resolve_organization_id(graphql: &GraphQLApi, slug: &Slug) -> Result<NodeId> {
    #[derive(Deserialize)]
    struct Data {
        organization: Option<Org>,
    }
    #[derive(Deserialize)]
    struct Org {
        id: NodeId,
    }

    let data: Data = graphql
        .execute(
            "OrganizationId",
            documents::ORGANIZATION,
            json!({ "slug": slug.as_str() }),
        )
        .await?;

    let org = data.organization.ok_or_else(|| BuildkiteError::NotFound {
        kind: "Organization",
        id: slug.to_string(),
    })?;
    if org.id.is_empty() {
        return Err(BuildkiteError::Contract(format!(
            "empty id for organization: {slug}"
        )));
    }
    Ok(org.id)
}
