mod jwt;

pub use self::jwt::JwtConfig;
