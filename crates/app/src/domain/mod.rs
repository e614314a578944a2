//! Ribbon Domain Concerns

pub mod cards;
pub mod discounts;
pub mod shops;
