use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by the authentication API on a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TokenResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LoginResponse {
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct LogoutResponse {
    pub success: bool,
    pub redirect: String,
}
