//! Data models

pub mod record;
pub mod dataset;
pub mod filter;

pub use record::*;
pub use dataset::*;
pub use filter::*;
