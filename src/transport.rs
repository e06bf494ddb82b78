use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::auth::Token;
use crate::error::{BuildkiteError, Result};

const USER_AGENT: &str = concat!("buildkite-reconciler/", env!("CARGO_PKG_VERSION"));

/// HTTP transport that signs every outbound request with the bearer token.
///
/// Both the REST and the GraphQL sub-clients share one transport, so the
/// `Authorization` header is installed as a default header instead of being
/// added per call. Everything else (TLS, redirects, keep-alive) is left to
/// `reqwest`.
#[derive(Clone)]
pub struct AuthenticatedTransport {
    client: Client,
}

impl AuthenticatedTransport {
    pub fn new(token: &Token) -> Result<Self> {
        if token.is_empty() {
            return Err(BuildkiteError::Config("API token must not be empty".into()));
        }

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| BuildkiteError::Config(format!("Invalid API token: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| BuildkiteError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Validates the token against the REST `access-token` endpoint.
    ///
    /// Only a 200 response counts as success. Any other status and any
    /// network failure are reported as [`BuildkiteError::Authentication`].
    pub async fn check_auth(&self, rest_url: &Url) -> Result<()> {
        let url = rest_url.join("access-token")?;
        debug!("Checking API token against {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BuildkiteError::Authentication(format!("token check failed: {e}")))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(BuildkiteError::Authentication(format!(
                "non 200 status from access-token endpoint: {status}"
            ))),
        }
    }
}
