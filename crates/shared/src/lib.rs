pub mod abstract_trait;
pub mod config;
pub mod domain;
pub mod errors;
pub mod gate;
pub mod policy;
pub mod service;
pub mod utils;
