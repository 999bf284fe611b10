use crate::{
    abstract_trait::TokenCodecTrait,
    domain::{Claims, Role, RoleClaim, RoleSet},
};
use tracing::debug;

/// Normalized role labels carried by a raw credential.
///
/// An undecodable credential yields the empty set, which grants access to no
/// role-gated route. Expiry is not considered here.
pub fn roles_of(codec: &dyn TokenCodecTrait, raw: &str) -> RoleSet {
    match codec.decode(raw) {
        Ok(claims) => roles_from_claims(&claims),
        Err(e) => {
            debug!("Role extraction skipped: {}", e);
            RoleSet::new()
        }
    }
}

pub fn roles_from_claims(claims: &Claims) -> RoleSet {
    let labels: Vec<&str> = match claims.role_claim() {
        Some(RoleClaim::Delimited(value)) => value.split(',').map(str::trim).collect(),
        Some(RoleClaim::List(values)) => values.iter().map(String::as_str).collect(),
        Some(RoleClaim::Other(value)) => {
            debug!("Ignoring role claim of unexpected shape: {}", value);
            Vec::new()
        }
        None => Vec::new(),
    };

    labels
        .into_iter()
        .filter_map(|label| match label.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                debug!("Dropping role token: {}", e);
                None
            }
        })
        .collect()
}
