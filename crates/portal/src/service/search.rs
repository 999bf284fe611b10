use crate::{abstract_trait::SearchApiClientTrait, domain::requests::search::GraphQlRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::errors::HttpError;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct SearchApiClientService {
    client: Client,
    graphql_url: String,
}

impl SearchApiClientService {
    pub fn new(graphql_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client for the GraphQL API")?;

        Ok(Self {
            client,
            graphql_url: graphql_url.to_string(),
        })
    }
}

#[async_trait]
impl SearchApiClientTrait for SearchApiClientService {
    async fn execute(
        &self,
        request: &GraphQlRequest,
        token: Option<&str>,
    ) -> Result<Value, HttpError> {
        if self.graphql_url.is_empty() {
            return Err(HttpError::Internal(
                "GRAPHQL_URL environment variable is not defined".into(),
            ));
        }

        debug!("Forwarding GraphQL query to {}", self.graphql_url);

        let mut builder = self.client.post(&self.graphql_url).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!("GraphQL backend unreachable: {}", e);
            HttpError::Internal(format!("Backend request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GraphQL backend answered {}: {}", status, body);
            return Err(HttpError::Internal(format!(
                "Backend request failed: {status} - {body}"
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Malformed GraphQL response: {}", e);
            HttpError::Internal(format!("Malformed backend response: {e}"))
        })
    }
}
