use crate::{
    abstract_trait::AuthApiClientTrait,
    domain::{requests::auth::LoginRequest, response::token::TokenResponse},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use shared::errors::HttpError;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct AuthApiClientService {
    client: Client,
    base_url: String,
}

impl AuthApiClientService {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client for the authentication API")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthApiClientTrait for AuthApiClientService {
    async fn login(&self, input: &LoginRequest) -> Result<TokenResponse, HttpError> {
        let start = Instant::now();
        debug!("Forwarding login for user: {}", input.username);

        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(input)
            .send()
            .await
            .map_err(|e| {
                error!("Authentication API unreachable: {}", e);
                HttpError::Unauthorized("Invalid credentials".into())
            })?;

        if !response.status().is_success() {
            warn!(
                "Login rejected with status {} after {:?}",
                response.status(),
                start.elapsed()
            );
            return Err(HttpError::Unauthorized("Invalid credentials".into()));
        }

        let token = response.json::<TokenResponse>().await.map_err(|e| {
            error!("Malformed login response: {}", e);
            HttpError::Internal("Malformed response from authentication service".into())
        })?;

        info!("Login accepted in {:?}", start.elapsed());
        Ok(token)
    }

    async fn disconnect(&self, token: Option<&str>) -> Result<(), HttpError> {
        let mut request = self.client.post(self.url("/auth/disconnect"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!("Authentication API unreachable on logout: {}", e);
            HttpError::ServiceUnavailable("Authentication service unavailable".into())
        })?;

        if !response.status().is_success() {
            warn!("Logout rejected with status {}", response.status());
            return Err(HttpError::BadRequest("Logout failed".into()));
        }

        Ok(())
    }

    async fn verify(&self, authorization: &str, cookie: Option<&str>) -> Result<Value, HttpError> {
        let mut request = self
            .client
            .get(self.url("/auth/verify"))
            .header(header::AUTHORIZATION, authorization);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            error!("Authentication API unreachable on verify: {}", e);
            HttpError::Unauthorized("Unauthorized".into())
        })?;

        if !response.status().is_success() {
            return Err(HttpError::Unauthorized("Unauthorized".into()));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Malformed verify response: {}", e);
            HttpError::Unauthorized("Unauthorized".into())
        })
    }
}
