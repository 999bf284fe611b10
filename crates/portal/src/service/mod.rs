mod auth;
mod search;

pub use self::auth::AuthApiClientService;
pub use self::search::SearchApiClientService;
