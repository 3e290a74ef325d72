//! Cohort ranking by composite score
//!
//! Standard competition ranking ("1224"): equal scores share a rank and the
//! next distinct score is ranked one past the number of entries above it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An entry with its assigned rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub rank: usize,
    pub composite_score: f64,
    pub entry: T,
}

/// Rank a single cohort, highest composite score first.
///
/// The sort is stable: entries with exactly equal scores keep the order in
/// which they were passed in.
pub fn rank<T>(entries: Vec<(T, f64)>) -> Vec<Ranked<T>> {
    let mut entries = entries;
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut ranked: Vec<Ranked<T>> = Vec::with_capacity(entries.len());
    for (position, (entry, composite_score)) in entries.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(previous) if previous.composite_score == composite_score => previous.rank,
            _ => position + 1,
        };
        ranked.push(Ranked {
            rank,
            composite_score,
            entry,
        });
    }

    ranked
}
