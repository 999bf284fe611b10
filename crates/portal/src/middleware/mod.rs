pub mod gate;
pub mod guard;
pub mod validate;

pub use self::gate::request_gate_middleware;
pub use self::guard::GuardedPage;
pub use self::validate::SimpleValidatedJson;
