use crate::{domain::Claims, errors::AccessError};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type DynTokenCodec = Arc<dyn TokenCodecTrait + Send + Sync>;

pub trait TokenCodecTrait: Send + Sync + std::fmt::Debug {
    /// Decodes the raw credential without looking at its expiry.
    fn decode(&self, raw: &str) -> Result<Claims, AccessError>;

    /// Decodes and requires `now` to be strictly before the expiry instant.
    fn validate_at(&self, raw: &str, now: DateTime<Utc>) -> Result<Claims, AccessError> {
        let claims = self.decode(raw)?;

        let expires_at = claims.expires_at().ok_or_else(|| {
            AccessError::MalformedCredential(format!("exp out of range: {}", claims.exp))
        })?;

        if now < expires_at {
            Ok(claims)
        } else {
            Err(AccessError::ExpiredCredential)
        }
    }

    fn is_valid_at(&self, raw: &str, now: DateTime<Utc>) -> bool {
        self.validate_at(raw, now).is_ok()
    }

    fn is_valid(&self, raw: &str) -> bool {
        self.is_valid_at(raw, Utc::now())
    }
}
