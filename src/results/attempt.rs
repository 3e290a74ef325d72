//! Drill attempt entity
//!
//! An attempt keeps the raw measurement exactly as submitted next to the
//! normalized score computed from it. Both are private and only change
//! together, through a [`Normalizer`], so a stored attempt can never carry a
//! normalized score that is stale relative to its raw value.

use crate::scoring::normalizer::{NormalizeStatus, Normalized, Normalizer};
use crate::types::{AttemptId, DrillType, PlayerId};
use crate::utils::{current_timestamp, generate_attempt_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw measurement for one player on one drill
///
/// Serializes with its normalized score for display, but is never
/// deserialized directly: persisted attempts come back through
/// [`AttemptRecord`] and [`Attempt::restore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attempt {
    id: AttemptId,
    player_id: PlayerId,
    drill: DrillType,
    raw: String,
    normalized: Normalized,
    recorded_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// The persisted part of an attempt. Any normalized score in the source
/// is ignored; it is recomputed on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: AttemptId,
    pub player_id: PlayerId,
    pub drill: DrillType,
    pub raw: String,
    pub recorded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attempt {
    /// Record a new attempt, normalizing the raw value
    pub fn record(
        player_id: PlayerId,
        drill: DrillType,
        raw: impl Into<String>,
        normalizer: &Normalizer,
    ) -> Self {
        let raw = raw.into();
        let normalized = normalizer.normalize(drill, &raw);
        let now = current_timestamp();
        Self {
            id: generate_attempt_id(),
            player_id,
            drill,
            raw,
            normalized,
            recorded_at: now,
            updated_at: now,
        }
    }

    /// Replace the raw value with a corrected one and re-normalize it
    pub fn correct(&mut self, raw: impl Into<String>, normalizer: &Normalizer) {
        self.raw = raw.into();
        self.normalized = normalizer.normalize(self.drill, &self.raw);
        self.updated_at = current_timestamp();
    }

    /// Rebuild a persisted attempt, re-normalizing its raw value
    pub fn restore(record: AttemptRecord, normalizer: &Normalizer) -> Self {
        let normalized = normalizer.normalize(record.drill, &record.raw);
        Self {
            id: record.id,
            player_id: record.player_id,
            drill: record.drill,
            raw: record.raw,
            normalized,
            recorded_at: record.recorded_at,
            updated_at: record.updated_at,
        }
    }

    /// The persisted part of this attempt
    pub fn to_record(&self) -> AttemptRecord {
        AttemptRecord {
            id: self.id,
            player_id: self.player_id,
            drill: self.drill,
            raw: self.raw.clone(),
            recorded_at: self.recorded_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn drill(&self) -> DrillType {
        self.drill
    }

    /// The raw value as it was submitted
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized_score(&self) -> u8 {
        self.normalized.score
    }

    pub fn status(&self) -> NormalizeStatus {
        self.normalized.status
    }

    pub fn normalized(&self) -> Normalized {
        self.normalized
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Calibration, CalibrationTable};

    #[test]
    fn test_record_normalizes() {
        let normalizer = Normalizer::default();
        let attempt = Attempt::record(1, DrillType::FortyMeterDash, "5.5 sec", &normalizer);

        assert_eq!(attempt.player_id(), 1);
        assert_eq!(attempt.raw(), "5.5 sec");
        assert_eq!(attempt.normalized_score(), 75);
        assert_eq!(attempt.status(), NormalizeStatus::Scored);
        assert_eq!(attempt.recorded_at(), attempt.updated_at());
    }

    #[test]
    fn test_correct_recomputes_normalized_score() {
        let normalizer = Normalizer::default();
        let mut attempt = Attempt::record(1, DrillType::VerticalJump, "DNF", &normalizer);
        assert_eq!(attempt.normalized_score(), 0);
        assert_eq!(attempt.status(), NormalizeStatus::Unparseable);

        let id = attempt.id();
        attempt.correct("25 in", &normalizer);

        assert_eq!(attempt.id(), id);
        assert_eq!(attempt.raw(), "25 in");
        assert_eq!(attempt.normalized_score(), 50);
        assert_eq!(attempt.status(), NormalizeStatus::Scored);
        assert!(attempt.updated_at() >= attempt.recorded_at());
    }

    #[test]
    fn test_restore_round_trips_through_record() {
        let normalizer = Normalizer::default();
        let attempt = Attempt::record(3, DrillType::Agility, "13.4", &normalizer);

        let json = serde_json::to_string(&attempt.to_record()).unwrap();
        let record: AttemptRecord = serde_json::from_str(&json).unwrap();
        let restored = Attempt::restore(record, &normalizer);

        assert_eq!(restored, attempt);
    }

    #[test]
    fn test_restore_ignores_stale_normalized_score() {
        let normalizer = Normalizer::default();
        let attempt = Attempt::record(4, DrillType::FortyMeterDash, "5.5", &normalizer);

        // A serialized attempt whose cached score was tampered with
        let mut json = serde_json::to_value(&attempt).unwrap();
        json["normalized"]["score"] = serde_json::json!(3);

        let record: AttemptRecord = serde_json::from_value(json).unwrap();
        let restored = Attempt::restore(record, &normalizer);

        assert_eq!(restored.raw(), "5.5");
        assert_eq!(restored.normalized_score(), 75);
        assert_eq!(restored.id(), attempt.id());
    }

    #[test]
    fn test_restore_uses_current_calibration() {
        let attempt = Attempt::record(5, DrillType::Catching, "10", &Normalizer::default());
        assert_eq!(attempt.normalized_score(), 50);

        let mut table = CalibrationTable::default();
        table.set(DrillType::Catching, Some(Calibration::higher_is_better(0.0, 10.0)));
        let restored = Attempt::restore(attempt.to_record(), &Normalizer::new(table));
        assert_eq!(restored.normalized_score(), 100);
    }
}
