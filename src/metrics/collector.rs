//! Metrics collection using Prometheus
//!
//! This module provides metrics for the combine tracker: result intake,
//! normalization issues surfaced to operators, and ranking activity.

use crate::scoring::NormalizeStatus;
use crate::types::DrillType;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the combine tracker
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Drill results recorded or corrected, by drill
    results_recorded_total: IntCounterVec,

    /// Normalizations that fell back to 0, by kind
    normalization_issues_total: IntCounterVec,

    /// Players registered
    players_registered_total: IntCounter,

    /// Cohort rankings computed
    rankings_computed_total: IntCounter,

    /// Distribution of composite scores handed to the ranker
    composite_score: Histogram,

    /// Time spent building a ranking
    ranking_duration_seconds: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let results_recorded_total = IntCounterVec::new(
            Opts::new(
                "combine_results_recorded_total",
                "Total drill results recorded or corrected",
            ),
            &["drill"],
        )?;
        registry.register(Box::new(results_recorded_total.clone()))?;

        let normalization_issues_total = IntCounterVec::new(
            Opts::new(
                "combine_normalization_issues_total",
                "Drill results scored 0 because they could not be normalized",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(normalization_issues_total.clone()))?;

        let players_registered_total = IntCounter::new(
            "combine_players_registered_total",
            "Total players registered",
        )?;
        registry.register(Box::new(players_registered_total.clone()))?;

        let rankings_computed_total = IntCounter::new(
            "combine_rankings_computed_total",
            "Total cohort rankings computed",
        )?;
        registry.register(Box::new(rankings_computed_total.clone()))?;

        let composite_score = Histogram::with_opts(
            HistogramOpts::new("combine_composite_score", "Composite scores of ranked players")
                .buckets(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]),
        )?;
        registry.register(Box::new(composite_score.clone()))?;

        let ranking_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "combine_ranking_duration_seconds",
                "Time taken to compute a cohort ranking",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )?;
        registry.register(Box::new(ranking_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            results_recorded_total,
            normalization_issues_total,
            players_registered_total,
            rankings_computed_total,
            composite_score,
            ranking_duration_seconds,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Record a drill result passing through the write path
    pub fn record_result(&self, drill: DrillType, status: NormalizeStatus) {
        self.results_recorded_total
            .with_label_values(&[drill.as_str()])
            .inc();

        if status != NormalizeStatus::Scored {
            self.normalization_issues_total
                .with_label_values(&[status.as_str()])
                .inc();
        }
    }

    pub fn record_player_registered(&self) {
        self.players_registered_total.inc();
    }

    /// Record a finished ranking and the composite scores it ordered
    pub fn record_ranking(&self, composite_scores: &[f64], duration: Duration) {
        self.rankings_computed_total.inc();
        for score in composite_scores {
            self.composite_score.observe(*score);
        }
        self.ranking_duration_seconds
            .observe(duration.as_secs_f64());
    }

    pub fn results_recorded(&self, drill: DrillType) -> u64 {
        self.results_recorded_total
            .with_label_values(&[drill.as_str()])
            .get()
    }

    pub fn normalization_issues(&self, status: NormalizeStatus) -> u64 {
        self.normalization_issues_total
            .with_label_values(&[status.as_str()])
            .get()
    }

    pub fn rankings_computed(&self) -> u64 {
        self.rankings_computed_total.get()
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather_text(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_result_counts_issues() {
        let metrics = MetricsCollector::new().unwrap();

        metrics.record_result(DrillType::Agility, NormalizeStatus::Scored);
        metrics.record_result(DrillType::Agility, NormalizeStatus::Unparseable);
        metrics.record_result(DrillType::Throwing, NormalizeStatus::Unconfigured);

        assert_eq!(metrics.results_recorded(DrillType::Agility), 2);
        assert_eq!(metrics.results_recorded(DrillType::Throwing), 1);
        assert_eq!(metrics.normalization_issues(NormalizeStatus::Unparseable), 1);
        assert_eq!(metrics.normalization_issues(NormalizeStatus::Unconfigured), 1);
        assert_eq!(metrics.normalization_issues(NormalizeStatus::Scored), 0);
    }

    #[test]
    fn test_gather_text() {
        let metrics = MetricsCollector::new().unwrap();
        metrics.record_player_registered();
        metrics.record_ranking(&[22.5, 80.0], Duration::from_millis(1));

        let text = metrics.gather_text().unwrap();
        assert!(text.contains("combine_players_registered_total 1"));
        assert!(text.contains("combine_rankings_computed_total 1"));
        assert!(text.contains("combine_composite_score_count 2"));
        assert_eq!(metrics.rankings_computed(), 1);
    }

    #[test]
    fn test_separate_registries() {
        assert!(MetricsCollector::new().is_ok());
        assert!(MetricsCollector::new().is_ok());
    }

    #[test]
    fn test_timer() {
        let metrics = MetricsCollector::new().unwrap();
        let timer = metrics.start_timer();
        assert!(timer.stop() >= Duration::ZERO);
    }
}
