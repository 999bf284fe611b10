mod access;
mod error;
mod http;

pub use self::access::AccessError;
pub use self::error::ErrorResponse;
pub use self::http::HttpError;
