//! Orders

pub mod data;
pub mod errors;
#[cfg(test)]
pub(crate) mod fakes;
pub mod lifecycle;
pub mod pricing;
pub mod records;
pub mod service;
pub mod status;
pub mod store;

pub use errors::OrdersServiceError;
pub use service::*;
pub use status::OrderStatus;
