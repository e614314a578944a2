//! Authority admin API access.

mod client;
mod models;

pub use client::*;
pub use models::*;
