//! Authentication and authorization

pub mod enforcer;
mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use enforcer::{Enforcer, EnforcerError, MockEnforcer, PgEnforcer};
pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
