//! Tally
//!
//! Tally turns flat sales records into business metrics: revenue totals,
//! dispersion, monthly trends and product rankings, rendered as text reports,
//! SVG charts and a filterable dashboard view.

pub mod analysis;
pub mod charts;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod generator;
pub mod money;
pub mod prelude;
pub mod records;
pub mod report;
pub mod stats;
