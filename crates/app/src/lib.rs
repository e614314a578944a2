//! Shared application domain, session store access, and the authority client.

pub mod authority;
pub mod context;
pub mod database;
pub mod domain;
pub mod sessions;
