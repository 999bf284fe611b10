mod claims;
mod role;
mod session;

pub use self::claims::{Claims, RoleClaim};
pub use self::role::{Role, RoleSet, UnknownRole};
pub use self::session::Session;
