//! Discounts

mod code;
pub mod errors;
pub mod models;
pub mod service;

pub use errors::DiscountsServiceError;
pub use service::*;
