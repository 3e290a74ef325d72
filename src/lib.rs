//! Combine Tracker - scoring and ranking for youth sports combines
//!
//! This crate normalizes raw drill measurements onto a common 0-100 scale,
//! combines each player's best results into a weighted composite score, and
//! ranks players within age-group cohorts.

pub mod config;
pub mod error;
pub mod metrics;
pub mod results;
pub mod scoring;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{CombineError, Result};
pub use types::*;

// Re-export key components
pub use results::{CombineStorage, InMemoryCombineStorage};
pub use scoring::ScoringEngine;
pub use service::CombineService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
