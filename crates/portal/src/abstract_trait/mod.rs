pub mod auth;
pub mod search;

pub use self::auth::{AuthApiClientTrait, DynAuthApiClient};
pub use self::search::{DynSearchApiClient, SearchApiClientTrait};
