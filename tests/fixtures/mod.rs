//! Test fixtures for integration testing

#![allow(dead_code)]

use combine_tracker::config::ScoringConfig;
use combine_tracker::metrics::MetricsCollector;
use combine_tracker::results::{CombineStorage, InMemoryCombineStorage, MockCombineStorage};
use combine_tracker::scoring::ScoringEngine;
use combine_tracker::service::CombineService;
use combine_tracker::types::{DrillType, NewPlayer, Player};
use std::sync::Arc;

/// A service over in-memory storage with the default event configuration
pub fn create_test_service() -> CombineService {
    create_service_with(Arc::new(InMemoryCombineStorage::new()), ScoringConfig::default())
}

pub fn create_service_with(storage: Arc<dyn CombineStorage>, config: ScoringConfig) -> CombineService {
    CombineService::new(storage, ScoringEngine::from_config(&config))
}

/// A service whose storage records every attempt written to it
pub fn create_recording_service() -> (CombineService, Arc<MockCombineStorage>) {
    let storage = Arc::new(MockCombineStorage::new());
    let service = create_service_with(storage.clone(), ScoringConfig::default());
    (service, storage)
}

pub fn create_metered_service() -> (CombineService, Arc<MetricsCollector>) {
    let metrics = Arc::new(MetricsCollector::new().unwrap());
    let service = create_test_service().with_metrics(metrics.clone());
    (service, metrics)
}

/// Register a player and record one result per `(drill, raw)` pair
pub fn seed_player(
    service: &CombineService,
    name: &str,
    age: u32,
    results: &[(DrillType, &str)],
) -> Player {
    let player = service.register_player(NewPlayer::new(name, age)).unwrap();
    for (drill, raw) in results {
        service.submit_result(player.id, *drill, raw).unwrap();
    }
    player
}

/// Raw values that score exactly `score` on every drill under the default calibration
pub fn uniform_results(score: u8) -> Vec<(DrillType, String)> {
    let s = f64::from(score);
    vec![
        (DrillType::FortyMeterDash, format!("{}", 10.0 - 6.0 * s / 100.0)),
        (DrillType::VerticalJump, format!("{}", 50.0 * s / 100.0)),
        (DrillType::Agility, format!("{}", 20.0 - 12.0 * s / 100.0)),
        (DrillType::Throwing, format!("{}", s)),
        (DrillType::Catching, format!("{}", 20.0 * s / 100.0)),
    ]
}

/// Register a player with the same normalized score on every drill
pub fn seed_uniform_player(service: &CombineService, name: &str, age: u32, score: u8) -> Player {
    let player = service.register_player(NewPlayer::new(name, age)).unwrap();
    for (drill, raw) in uniform_results(score) {
        service.submit_result(player.id, drill, &raw).unwrap();
    }
    player
}
