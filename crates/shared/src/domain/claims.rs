use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role claim as issued by the authentication API.
///
/// Either a comma-delimited string (`"Admin,Search"`) or a list of labels.
/// Anything else is kept so decoding never fails on the claim's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    Delimited(String),
    List(Vec<String>),
    Other(Value),
}

impl RoleClaim {
    pub fn is_blank(&self) -> bool {
        matches!(self, RoleClaim::Delimited(value) if value.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl Claims {
    /// The role claim under `role`, falling back to `roles` when the primary
    /// field is missing or blank.
    pub fn role_claim(&self) -> Option<&RoleClaim> {
        self.role
            .as_ref()
            .filter(|claim| !claim.is_blank())
            .or(self.roles.as_ref())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
