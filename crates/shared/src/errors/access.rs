use crate::domain::Role;
use thiserror::Error;

/// Why a gate refused a navigation.
///
/// Credential failures collapse to a login redirect and role failures to the
/// unauthorized page; the variants only differ in logs and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("No credential presented")]
    MissingCredential,

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Credential has expired")]
    ExpiredCredential,

    #[error("Role mismatch, one of {required:?} is required")]
    RoleMismatch { required: Vec<Role> },
}

impl AccessError {
    pub fn kind(&self) -> &'static str {
        match self {
            AccessError::MissingCredential => "missing_credential",
            AccessError::MalformedCredential(_) => "malformed_credential",
            AccessError::ExpiredCredential => "expired_credential",
            AccessError::RoleMismatch { .. } => "role_mismatch",
        }
    }
}
