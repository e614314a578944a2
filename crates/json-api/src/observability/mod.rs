//! Request-level observability.

pub(crate) mod request;
