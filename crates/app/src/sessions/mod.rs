//! Session store (read-only).

mod models;
mod repository;

pub use models::*;
pub use repository::*;
