use crate::{abstract_trait::TokenCodecTrait, domain::Claims, errors::AccessError};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use std::collections::HashSet;

/// Token codec for the credentials issued by the authentication API.
///
/// With a secret the HMAC signature is verified; without one the token is
/// only decoded and its signature is left to the API that issued it.
#[derive(Clone)]
pub struct JwtConfig {
    jwt_secret: Option<String>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("verify_signature", &self.jwt_secret.is_some())
            .finish()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: Some(jwt_secret.to_string()),
        }
    }

    pub fn unverified() -> Self {
        JwtConfig { jwt_secret: None }
    }

    pub fn from_secret(jwt_secret: Option<&str>) -> Self {
        match jwt_secret {
            Some(secret) if !secret.is_empty() => Self::new(secret),
            _ => Self::unverified(),
        }
    }

    pub fn verifies_signature(&self) -> bool {
        self.jwt_secret.is_some()
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        if self.jwt_secret.is_none() {
            validation.insecure_disable_signature_validation();
        }

        validation
    }

    fn decoding_key(&self) -> DecodingKey {
        match &self.jwt_secret {
            Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
            None => DecodingKey::from_secret(&[]),
        }
    }
}

impl TokenCodecTrait for JwtConfig {
    fn decode(&self, raw: &str) -> Result<Claims, AccessError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AccessError::MissingCredential);
        }

        decode::<Claims>(raw, &self.decoding_key(), &self.validation())
            .map(|token_data| token_data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::MissingRequiredClaim(claim) => {
                    AccessError::MalformedCredential(format!("missing claim: {claim}"))
                }
                _ => AccessError::MalformedCredential(err.to_string()),
            })
    }
}
