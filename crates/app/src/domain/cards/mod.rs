//! Cards

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CardsServiceError;
pub use service::*;
