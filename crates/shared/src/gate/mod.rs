mod render;
mod request;

pub use self::render::{GuardState, GuardView, RenderGuard};
pub use self::request::{GateDecision, RequestGate};

use crate::{
    abstract_trait::TokenCodecTrait,
    domain::Session,
    errors::AccessError,
    service::roles_from_claims,
};
use chrono::{DateTime, Utc};

/// Resolves an optional raw credential into a session, failing closed.
pub(crate) fn authenticate(
    codec: &dyn TokenCodecTrait,
    credential: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Session, AccessError> {
    let raw = credential
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(AccessError::MissingCredential)?;

    let claims = codec.validate_at(raw, now)?;
    let roles = roles_from_claims(&claims);
    let expires_at = claims
        .expires_at()
        .ok_or_else(|| AccessError::MalformedCredential("exp out of range".to_string()))?;

    Ok(Session::new(&claims, roles, expires_at))
}
