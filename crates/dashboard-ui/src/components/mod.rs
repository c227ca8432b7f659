pub mod header;
pub mod metrics;
pub mod share_bar;
