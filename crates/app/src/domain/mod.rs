//! Tally Domain Concerns

pub mod sales;
