use graphql_client::{QueryBody, Response as GraphQLResponse};
use log::{debug, trace};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{BuildkiteError, Result};

/// GraphQL sub-client. Posts hand-written documents to a single endpoint.
pub(crate) struct GraphQLApi {
    client: Client,
    url: Url,
}

impl GraphQLApi {
    pub(crate) fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Execute an operation and return its `data`.
    ///
    /// Any entry in `errors` fails the whole operation, including responses
    /// that also carry partial data.
    pub(crate) async fn execute<V, T>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let request_body = QueryBody {
            variables,
            query,
            operation_name,
        };
        debug!("GraphQL {operation_name}");
        trace!("GraphQL variables: {}", serde_json::to_string(&request_body.variables)?);

        let response = self
            .client
            .post(self.url.clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(BuildkiteError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_body: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = response_body.errors.filter(|e| !e.is_empty()) {
            return Err(BuildkiteError::GraphQL {
                operation: operation_name.to_string(),
                errors: errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        response_body.data.ok_or(BuildkiteError::NoResponseData)
    }
}

/// `{ "node": ... }` as returned by `node(id:)` lookups.
#[derive(Debug, Deserialize)]
pub(crate) struct NodeData {
    pub node: Option<Value>,
}

/// Decode a `node(id:)` result of the expected `__typename`.
///
/// A null node, or a node of another type, means nothing of that kind
/// exists under `id`.
pub(crate) fn expect_node<T: DeserializeOwned>(
    node: Option<Value>,
    typename: &'static str,
    id: &str,
) -> Result<T> {
    let not_found = || BuildkiteError::NotFound {
        kind: typename,
        id: id.to_string(),
    };
    let node = node.ok_or_else(not_found)?;
    if node.get("__typename").and_then(Value::as_str) != Some(typename) {
        return Err(not_found());
    }
    Ok(serde_json::from_value(node)?)
}

/// A connection as a single page of edges.
#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub edges: Option<Vec<Option<Edge<T>>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: Option<T>,
}

impl<T> Connection<T> {
    /// Flatten the edges in server order, skipping null entries.
    pub(crate) fn into_nodes(self) -> Vec<T> {
        self.edges
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|edge| edge.node)
            .collect()
    }
}

/// Variables of a mutation taking a single `$input`.
#[derive(Debug, Serialize)]
pub(crate) struct Input<T> {
    pub input: T,
}

/// `{ "id": ... }` reference to a related object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NodeRef {
    pub id: crate::identity::NodeId,
}
