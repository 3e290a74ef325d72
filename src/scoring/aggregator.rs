//! Composite score aggregation
//!
//! Picks each drill's best attempt and folds every drill, attempted or not,
//! into a single weighted score. A drill with no attempt contributes 0 at its
//! full weight, so skipping a drill costs points rather than being ignored.

use crate::results::Attempt;
use crate::scoring::weights::DrillWeights;
use crate::types::DrillType;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A player's composite score with the per-drill values it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeBreakdown {
    /// Weighted composite on 0-100, rounded to 2 decimal places
    pub composite_score: f64,
    /// Best normalized score for every drill, 0 where not attempted
    pub best_normalized: BTreeMap<DrillType, u8>,
    /// Raw value of the best attempt, only for drills actually attempted
    pub best_raw: BTreeMap<DrillType, String>,
}

/// Compute a player's composite score from their attempts.
///
/// The best attempt per drill is the one with the highest normalized score;
/// on a tie the earliest attempt in iteration order is kept.
pub fn compute_composite<'a, I>(attempts: I, weights: &DrillWeights) -> CompositeBreakdown
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let mut best: BTreeMap<DrillType, &Attempt> = BTreeMap::new();
    for attempt in attempts {
        match best.get(&attempt.drill()) {
            Some(current) if current.normalized_score() >= attempt.normalized_score() => {}
            _ => {
                best.insert(attempt.drill(), attempt);
            }
        }
    }

    let best_normalized: BTreeMap<DrillType, u8> = DrillType::ALL
        .iter()
        .map(|drill| {
            let score = best.get(drill).map_or(0, |a| a.normalized_score());
            (*drill, score)
        })
        .collect();

    let best_raw = best
        .iter()
        .map(|(drill, attempt)| (*drill, attempt.raw().to_string()))
        .collect();

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for drill in DrillType::ALL {
        let weight = weights.get(drill);
        weighted_sum += f64::from(best_normalized[&drill]) * weight;
        total_weight += weight;
    }

    let composite_score = if total_weight > 0.0 {
        round_to(weighted_sum / total_weight, 2)
    } else {
        0.0
    };

    CompositeBreakdown {
        composite_score,
        best_normalized,
        best_raw,
    }
}
