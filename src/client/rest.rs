use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BuildkiteError, Result};

/// REST sub-client rooted at the versioned API base (e.g. `.../v2/`).
pub(crate) struct RestApi {
    client: Client,
    base_url: Url,
}

/// What a request is about, for not-found reporting.
pub(crate) struct Target<'a> {
    pub kind: &'static str,
    pub id: &'a str,
}

impl RestApi {
    pub(crate) fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        target: Target<'_>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path, body)?, target).await?;
        Ok(response.json().await?)
    }

    /// Send a request whose response body is irrelevant (e.g. `DELETE`).
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        target: Target<'_>,
    ) -> Result<()> {
        self.send(self.request::<()>(method, path, None)?, target)
            .await
            .map(|_| ())
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        let request = self.client.request(method, url);
        Ok(match body {
            Some(body) => request.json(body),
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder, target: Target<'_>) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(BuildkiteError::NotFound {
                kind: target.kind,
                id: target.id.to_string(),
            });
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(BuildkiteError::Api {
                status: status.as_u16(),
                message: error_message(&error_text),
            });
        }

        Ok(response)
    }
}

/// REST errors come as `{"message": "...", "errors": [...]}`; fall back to
/// the raw body for anything else.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
        #[serde(default)]
        errors: Vec<serde_json::Value>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if parsed.errors.is_empty() => parsed.message,
        Ok(parsed) => {
            let details: Vec<String> = parsed
                .errors
                .iter()
                .map(|e| match e {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            format!("{} ({})", parsed.message, details.join(", "))
        }
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message(r#"{"message":"Validation Failed","errors":["Name has already been taken"]}"#),
            "Validation Failed (Name has already been taken)"
        );
        assert_eq!(error_message(r#"{"message":"Forbidden"}"#), "Forbidden");
    }

    #[test]
    fn test_error_message_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
