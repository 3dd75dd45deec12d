//! GraphQL-over-HTTP client for the identity service.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphqlRequest<V: Serialize> {
    query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<V>,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Error type for GraphQL calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A structured error reported by the service. Carries the first
    /// reported message.
    #[error("{0}")]
    Graphql(String),

    #[error("No data returned")]
    NoData,
}

/// Unwrap a response envelope: errors take precedence over any partial data.
fn into_result<T>(response: GraphqlResponse<T>) -> Result<T, ClientError> {
    if let Some(errors) = response.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(ClientError::Graphql(first.message));
        }
    }
    response.data.ok_or(ClientError::NoData)
}

/// Thin client for posting GraphQL documents to a single endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a query or mutation. `bearer` is attached as an
    /// `Authorization: Bearer` header when present, never as a body field.
    pub async fn execute<V, R>(
        &self,
        query: &'static str,
        variables: Option<V>,
        bearer: Option<&str>,
    ) -> Result<R, ClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let request = GraphqlRequest { query, variables };

        let mut req = self.http.post(&self.endpoint).json(&request);
        if let Some(token) = bearer {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        tracing::debug!(endpoint = %self.endpoint, "executing GraphQL call");
        let response = req.send().await?;
        let envelope: GraphqlResponse<R> = response.json().await?;

        into_result(envelope)
    }
}
