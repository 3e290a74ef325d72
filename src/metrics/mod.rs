//! Metrics for the combine tracker

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer};
