//! Composite scoring and ranking engine
//!
//! This module normalizes raw drill measurements onto a common 0-100 scale,
//! folds a player's best attempts into a weighted composite score, and ranks
//! a cohort by that score. Everything here is pure and synchronous.

pub mod aggregator;
pub mod engine;
pub mod normalizer;
pub mod ranker;
pub mod weights;

// Re-export commonly used types
pub use aggregator::{compute_composite, CompositeBreakdown};
pub use engine::ScoringEngine;
pub use normalizer::{
    parse_raw_value, Calibration, CalibrationTable, NormalizeStatus, Normalized, Normalizer,
};
pub use ranker::{rank, Ranked};
pub use weights::DrillWeights;
