//! Data layer for the bike rental dashboard.
//!
//! Responsible for loading the daily and hourly CSV tables, filtering them to
//! a date range, running the grouped aggregations and assembling the
//! per-range report consumed by the UI.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
