use crate::domain::{requests::auth::LoginRequest, response::token::TokenResponse};
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynAuthApiClient = Arc<dyn AuthApiClientTrait + Send + Sync>;

/// Authentication endpoints of the external registry API.
#[async_trait]
pub trait AuthApiClientTrait {
    async fn login(&self, input: &LoginRequest) -> Result<TokenResponse, HttpError>;
    async fn disconnect(&self, token: Option<&str>) -> Result<(), HttpError>;
    async fn verify(&self, authorization: &str, cookie: Option<&str>)
    -> Result<Value, HttpError>;
}
