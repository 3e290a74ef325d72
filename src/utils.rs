//! Utility functions for the combine tracker

use crate::types::AttemptId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique attempt ID
pub fn generate_attempt_id() -> AttemptId {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round a value to the given number of decimal places (half away from zero)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
