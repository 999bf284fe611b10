use crate::domain::{Claims, RoleSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of an authenticated navigation, derived from a valid credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject: Option<String>,
    pub user_id: Option<i64>,
    pub roles: RoleSet,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(claims: &Claims, roles: RoleSet, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject: claims.sub.clone(),
            user_id: claims.id,
            roles,
            expires_at,
        }
    }
}
