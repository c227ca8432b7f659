//! Shared building blocks for the bike rental dashboard.
//!
//! Holds the error type, the input record and derived-table models, calendar
//! labels and date parsing, number formatting helpers and the CLI settings.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
