//! Data pipeline: generation, filtering, aggregation, export
//!
//! ```text
//! generator ──► Dataset ──► filter ──► FilteredView ──┬──► aggregates
//!                                                     └──► export (CSV)
//! ```

pub mod generator;
pub mod filter;
pub mod aggregates;
pub mod types;
pub mod export;
pub mod dashboard;

#[cfg(test)]
mod tests;

pub use generator::{generate, GeneratorConfig};
pub use filter::filter;
pub use types::*;
pub use dashboard::DashboardSnapshot;
