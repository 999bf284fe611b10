mod roles;

pub use self::roles::{roles_from_claims, roles_of};
