//! Terminal UI layer for the bike rental dashboard.
//!
//! Provides themes, the header, metric cards, share bars, chart panels and
//! the synchronous application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use dashboard_core as core;
