//! Scoring engine bundling one event's calibration and weights.
//!
//! The engine holds no mutable state; it can be shared across threads and
//! called concurrently, each call reading only its own inputs.

use crate::config::ScoringConfig;
use crate::results::Attempt;
use crate::scoring::aggregator::{compute_composite, CompositeBreakdown};
use crate::scoring::normalizer::{Normalized, Normalizer};
use crate::scoring::ranker::{rank, Ranked};
use crate::scoring::weights::DrillWeights;
use crate::types::DrillType;

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    normalizer: Normalizer,
    weights: DrillWeights,
}

impl ScoringEngine {
    pub fn new(normalizer: Normalizer, weights: DrillWeights) -> Self {
        Self {
            normalizer,
            weights,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            Normalizer::new(config.calibration.clone()),
            config.weights,
        )
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn weights(&self) -> &DrillWeights {
        &self.weights
    }

    pub fn normalize(&self, drill: DrillType, raw: &str) -> Normalized {
        self.normalizer.normalize(drill, raw)
    }

    pub fn composite<'a, I>(&self, attempts: I) -> CompositeBreakdown
    where
        I: IntoIterator<Item = &'a Attempt>,
    {
        compute_composite(attempts, &self.weights)
    }

    pub fn rank<T>(&self, entries: Vec<(T, f64)>) -> Vec<Ranked<T>> {
        rank(entries)
    }
}
