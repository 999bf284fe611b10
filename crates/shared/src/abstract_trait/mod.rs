mod jwt;

pub use self::jwt::{DynTokenCodec, TokenCodecTrait};
