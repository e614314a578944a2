//! Ribbon
//!
//! Core domain rules for redeeming printed gift-card codes against a remote
//! balance authority. Raw customer input is normalised into a search key and
//! matched against the candidates the authority discloses; a separate rule
//! bounds the discount a verified balance may fund.
//!
//! The crate performs no I/O and reads no clocks, so the matching and amount
//! rules can be tested in isolation.

pub mod amounts;
pub mod cards;
pub mod codes;
