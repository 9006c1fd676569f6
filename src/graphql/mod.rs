//! Typed client for the hotel GraphQL endpoint.

pub mod documents;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// `{query, variables}` request body.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Single entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `{data}` or `{errors: [{message}]}` response body.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl<T> GraphqlResponse<T> {
    /// Unwrap `data`, turning any reported errors into [`AppError::Upstream`].
    pub fn into_result(self) -> Result<T, AppError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Upstream(message));
        }
        self.data
            .ok_or_else(|| AppError::Upstream("response carried no data".to_string()))
    }
}

/// HTTP client bound to a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query or mutation, forwarding `token` as a bearer credential.
    pub async fn execute<V, T>(
        &self,
        token: Option<&str>,
        query: &str,
        variables: V,
    ) -> Result<T, AppError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let operation = documents::operation_name(query);
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, %status, "GraphQL endpoint returned an error status");
            return Err(AppError::Upstream(format!("HTTP {status}: {body}")));
        }

        let bytes = response.bytes().await?;
        let envelope: GraphqlResponse<T> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Internal(format!("Could not decode {operation} response: {e}"))
        })?;

        tracing::debug!(operation, "GraphQL request completed");
        envelope.into_result()
    }
}
