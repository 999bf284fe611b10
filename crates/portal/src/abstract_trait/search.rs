use crate::domain::requests::search::GraphQlRequest;
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynSearchApiClient = Arc<dyn SearchApiClientTrait + Send + Sync>;

#[async_trait]
pub trait SearchApiClientTrait {
    async fn execute(
        &self,
        request: &GraphQlRequest,
        token: Option<&str>,
    ) -> Result<Value, HttpError>;
}
