//! HTTP handlers

pub mod health;
pub mod dataset;
pub mod analytics;
pub mod export;
pub mod extract;
