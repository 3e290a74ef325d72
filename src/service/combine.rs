//! Combine service: the write and read paths around the scoring engine
//!
//! Every raw value that reaches storage goes through the normalizer here, and
//! every composite score and ranking is recomputed from the current stored
//! attempts on request. Nothing derived is cached across mutations.

use crate::error::{CombineError, Result};
use crate::metrics::MetricsCollector;
use crate::results::{Attempt, CombineStorage};
use crate::scoring::{CompositeBreakdown, NormalizeStatus, ScoringEngine};
use crate::types::{AgeGroup, AttemptId, DrillType, NewPlayer, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A player with their current composite score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: Player,
    pub composite_score: f64,
    pub best_normalized: BTreeMap<DrillType, u8>,
    pub best_raw: BTreeMap<DrillType, String>,
}

impl PlayerSummary {
    fn new(player: Player, breakdown: CompositeBreakdown) -> Self {
        Self {
            player,
            composite_score: breakdown.composite_score,
            best_normalized: breakdown.best_normalized,
            best_raw: breakdown.best_raw,
        }
    }
}

/// One row of a cohort ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: PlayerSummary,
}

/// Counts removed by a full reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    pub players_removed: usize,
    pub results_removed: usize,
}

/// The combine service
#[derive(Clone)]
pub struct CombineService {
    storage: Arc<dyn CombineStorage>,
    engine: ScoringEngine,
    metrics: Option<Arc<MetricsCollector>>,
}

impl CombineService {
    pub fn new(storage: Arc<dyn CombineStorage>, engine: ScoringEngine) -> Self {
        Self {
            storage,
            engine,
            metrics: None,
        }
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn register_player(&self, player: NewPlayer) -> Result<Player> {
        player.validate()?;
        let stored = self.storage.insert_player(player)?;

        if let Some(metrics) = &self.metrics {
            metrics.record_player_registered();
        }
        info!(
            "Registered player {} ({}, age {})",
            stored.id, stored.name, stored.age
        );
        Ok(stored)
    }

    /// Players in insertion order, optionally limited to one age group
    pub fn list_players(&self, age_group: Option<&AgeGroup>) -> Result<Vec<Player>> {
        let players = self.storage.list_players()?;
        Ok(players
            .into_iter()
            .filter(|p| age_group.map_or(true, |group| group.contains(p.age)))
            .collect())
    }

    fn require_player(&self, player_id: PlayerId) -> Result<Player> {
        self.storage
            .get_player(player_id)?
            .ok_or_else(|| CombineError::PlayerNotFound { player_id }.into())
    }

    /// Record a drill result, normalizing it before it is stored
    pub fn submit_result(&self, player_id: PlayerId, drill: DrillType, raw: &str) -> Result<Attempt> {
        self.require_player(player_id)?;

        let attempt = Attempt::record(player_id, drill, raw, self.engine.normalizer());
        self.report_normalization(&attempt);
        self.storage.store_attempt(attempt.clone())?;

        debug!(
            "Recorded {} result for player {}: raw '{}' -> {}",
            drill,
            player_id,
            attempt.raw(),
            attempt.normalized_score()
        );
        Ok(attempt)
    }

    /// Replace a stored result's raw value and re-normalize it
    pub fn correct_result(&self, attempt_id: AttemptId, raw: &str) -> Result<Attempt> {
        let mut attempt = self
            .storage
            .get_attempt(attempt_id)?
            .ok_or(CombineError::AttemptNotFound { attempt_id })?;

        let previous = attempt.normalized_score();
        attempt.correct(raw, self.engine.normalizer());
        if !self.storage.replace_attempt(attempt.clone())? {
            // Deleted between the read and the write
            return Err(CombineError::AttemptNotFound { attempt_id }.into());
        }
        self.report_normalization(&attempt);

        info!(
            "Corrected {} result {} for player {}: {} -> {}",
            attempt.drill(),
            attempt_id,
            attempt.player_id(),
            previous,
            attempt.normalized_score()
        );
        Ok(attempt)
    }

    pub fn delete_result(&self, attempt_id: AttemptId) -> Result<bool> {
        let removed = self.storage.remove_attempt(attempt_id)?;
        if removed {
            info!("Deleted drill result {}", attempt_id);
        }
        Ok(removed)
    }

    /// Delete a player and all of their results
    pub fn delete_player(&self, player_id: PlayerId) -> Result<usize> {
        let removed = self
            .storage
            .remove_player(player_id)?
            .ok_or(CombineError::PlayerNotFound { player_id })?;

        info!(
            "Deleted player {} and {} drill results",
            player_id, removed
        );
        Ok(removed)
    }

    /// Delete every player and result
    pub fn reset(&self) -> Result<ResetSummary> {
        let (players_removed, results_removed) = self.storage.clear()?;
        warn!(
            "Reset removed {} players and {} drill results",
            players_removed, results_removed
        );
        Ok(ResetSummary {
            players_removed,
            results_removed,
        })
    }

    pub fn player_results(&self, player_id: PlayerId) -> Result<Vec<Attempt>> {
        self.require_player(player_id)?;
        self.storage.attempts_for_player(player_id)
    }

    pub fn player_summary(&self, player_id: PlayerId) -> Result<PlayerSummary> {
        let player = self.require_player(player_id)?;
        let attempts = self.storage.attempts_for_player(player_id)?;
        let breakdown = self.engine.composite(&attempts);
        Ok(PlayerSummary::new(player, breakdown))
    }

    /// Rank one cohort (or every player when no age group is given)
    pub fn rankings(&self, age_group: Option<&AgeGroup>) -> Result<Vec<PlayerRanking>> {
        let timer = self.metrics.as_ref().map(|m| m.start_timer());

        let cohort: Vec<(PlayerSummary, f64)> = self
            .storage
            .snapshot()?
            .into_iter()
            .filter(|(player, _)| age_group.map_or(true, |group| group.contains(player.age)))
            .map(|(player, attempts)| {
                let breakdown = self.engine.composite(&attempts);
                let score = breakdown.composite_score;
                (PlayerSummary::new(player, breakdown), score)
            })
            .collect();

        let rankings: Vec<PlayerRanking> = self
            .engine
            .rank(cohort)
            .into_iter()
            .map(|ranked| PlayerRanking {
                rank: ranked.rank,
                summary: ranked.entry,
            })
            .collect();

        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            let scores: Vec<f64> = rankings
                .iter()
                .map(|r| r.summary.composite_score)
                .collect();
            metrics.record_ranking(&scores, timer.stop());
        }

        debug!(
            "Ranked {} players for age group {}",
            rankings.len(),
            age_group.map_or_else(|| "all".to_string(), |g| g.to_string())
        );
        Ok(rankings)
    }

    fn report_normalization(&self, attempt: &Attempt) {
        match attempt.status() {
            NormalizeStatus::Scored => {}
            NormalizeStatus::Unparseable => warn!(
                "Could not read a number from {} result '{}' for player {}; scored as 0",
                attempt.drill(),
                attempt.raw(),
                attempt.player_id()
            ),
            NormalizeStatus::Unconfigured => warn!(
                "No calibration configured for drill {}; result for player {} scored as 0",
                attempt.drill(),
                attempt.player_id()
            ),
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_result(attempt.drill(), attempt.status());
        }
    }
}
