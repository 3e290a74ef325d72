//! Raw measurement normalization
//!
//! Converts one raw drill measurement into a 0-100 score using the drill's
//! calibration range and direction. Normalization is fail-soft: it always
//! yields a score, and reports through [`NormalizeStatus`] when that score
//! is a fallback rather than a measurement.

use crate::types::{Direction, DrillType};
use crate::utils::round_to;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))").expect("leading number pattern is valid")
});

/// Calibration range for a single drill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calibration {
    pub direction: Direction,
    pub min: f64,
    pub max: f64,
}

impl Calibration {
    pub fn lower_is_better(min: f64, max: f64) -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            min,
            max,
        }
    }

    pub fn higher_is_better(min: f64, max: f64) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            min,
            max,
        }
    }

    /// Scale an already-parsed measurement onto 0-100, rounding half up
    pub fn scale(&self, value: f64) -> u8 {
        if self.max == self.min {
            return 100;
        }

        let clamped = value.max(self.min).min(self.max);
        let span = self.max - self.min;
        let scaled = match self.direction {
            Direction::LowerIsBetter => 100.0 * (self.max - clamped) / span,
            Direction::HigherIsBetter => 100.0 * (clamped - self.min) / span,
        };

        // Drop binary noise first so exact halves such as 81.5 do not round down
        round_to(scaled, 9).round().clamp(0.0, 100.0) as u8
    }
}

/// Per-drill calibration ranges. A drill without an entry is unconfigured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationTable {
    #[serde(rename = "40m_dash", default)]
    pub forty_meter_dash: Option<Calibration>,
    #[serde(default)]
    pub vertical_jump: Option<Calibration>,
    #[serde(default)]
    pub agility: Option<Calibration>,
    #[serde(default)]
    pub throwing: Option<Calibration>,
    #[serde(default)]
    pub catching: Option<Calibration>,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self {
            forty_meter_dash: Some(Calibration::lower_is_better(4.0, 10.0)),
            vertical_jump: Some(Calibration::higher_is_better(0.0, 50.0)),
            agility: Some(Calibration::lower_is_better(8.0, 20.0)),
            throwing: Some(Calibration::higher_is_better(0.0, 100.0)),
            catching: Some(Calibration::higher_is_better(0.0, 20.0)),
        }
    }
}

impl CalibrationTable {
    /// A table with no drills configured
    pub fn empty() -> Self {
        Self {
            forty_meter_dash: None,
            vertical_jump: None,
            agility: None,
            throwing: None,
            catching: None,
        }
    }

    pub fn get(&self, drill: DrillType) -> Option<&Calibration> {
        match drill {
            DrillType::FortyMeterDash => self.forty_meter_dash.as_ref(),
            DrillType::VerticalJump => self.vertical_jump.as_ref(),
            DrillType::Agility => self.agility.as_ref(),
            DrillType::Throwing => self.throwing.as_ref(),
            DrillType::Catching => self.catching.as_ref(),
        }
    }

    pub fn set(&mut self, drill: DrillType, calibration: Option<Calibration>) {
        let slot = match drill {
            DrillType::FortyMeterDash => &mut self.forty_meter_dash,
            DrillType::VerticalJump => &mut self.vertical_jump,
            DrillType::Agility => &mut self.agility,
            DrillType::Throwing => &mut self.throwing,
            DrillType::Catching => &mut self.catching,
        };
        *slot = calibration;
    }
}

/// How a normalized score was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeStatus {
    /// The raw value was parsed and scaled
    Scored,
    /// No numeric token could be read from the raw value; score is 0
    Unparseable,
    /// The drill has no calibration entry; score is 0
    Unconfigured,
}

impl NormalizeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizeStatus::Scored => "scored",
            NormalizeStatus::Unparseable => "unparseable",
            NormalizeStatus::Unconfigured => "unconfigured",
        }
    }
}

/// Outcome of normalizing one raw measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    pub score: u8,
    pub status: NormalizeStatus,
}

impl Normalized {
    fn fallback(status: NormalizeStatus) -> Self {
        Self { score: 0, status }
    }

    pub fn is_scored(&self) -> bool {
        self.status == NormalizeStatus::Scored
    }
}

/// Extract the leading numeric token of a raw value, e.g. `"5.12 sec"` -> `5.12`
pub fn parse_raw_value(raw: &str) -> Option<f64> {
    let token = LEADING_NUMBER.captures(raw)?.get(1)?.as_str();
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Stateless normalizer over an injected calibration table
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    calibration: CalibrationTable,
}

impl Normalizer {
    pub fn new(calibration: CalibrationTable) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    /// Normalize a raw measurement given as free-form text.
    ///
    /// Checks run in order: calibration lookup, then parsing, then the range.
    /// A drill with no calibration is `Unconfigured` and text with no leading
    /// number is `Unparseable`, both scoring 0, even when the calibrated range
    /// is degenerate (`min == max`) and would otherwise score 100.
    pub fn normalize(&self, drill: DrillType, raw: &str) -> Normalized {
        let Some(calibration) = self.calibration.get(drill) else {
            return Normalized::fallback(NormalizeStatus::Unconfigured);
        };
        let Some(value) = parse_raw_value(raw) else {
            return Normalized::fallback(NormalizeStatus::Unparseable);
        };

        Normalized {
            score: calibration.scale(value),
            status: NormalizeStatus::Scored,
        }
    }

    /// Normalize an already-numeric measurement
    pub fn normalize_value(&self, drill: DrillType, value: f64) -> Normalized {
        let Some(calibration) = self.calibration.get(drill) else {
            return Normalized::fallback(NormalizeStatus::Unconfigured);
        };
        if !value.is_finite() {
            return Normalized::fallback(NormalizeStatus::Unparseable);
        }

        Normalized {
            score: calibration.scale(value),
            status: NormalizeStatus::Scored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::default()
    }

    #[test]
    fn test_parse_raw_value_leading_token() {
        assert_eq!(parse_raw_value("5.12 sec"), Some(5.12));
        assert_eq!(parse_raw_value("  18in"), Some(18.0));
        assert_eq!(parse_raw_value(".5"), Some(0.5));
        assert_eq!(parse_raw_value("7."), Some(7.0));
        assert_eq!(parse_raw_value("-3 yards"), Some(-3.0));
        assert_eq!(parse_raw_value("12 of 20"), Some(12.0));
    }

    #[test]
    fn test_parse_raw_value_rejects_non_numeric() {
        assert_eq!(parse_raw_value(""), None);
        assert_eq!(parse_raw_value("DNF"), None);
        assert_eq!(parse_raw_value("sec 5.1"), None);
        assert_eq!(parse_raw_value("."), None);
        assert_eq!(parse_raw_value("NaN"), None);
    }

    #[test]
    fn test_sprint_scenario() {
        let result = normalizer().normalize(DrillType::FortyMeterDash, "5.5 sec");
        assert_eq!(result.score, 75);
        assert_eq!(result.status, NormalizeStatus::Scored);
    }

    #[test]
    fn test_extremes_by_direction() {
        let n = normalizer();
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "4.0").score, 100);
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "10.0").score, 0);
        assert_eq!(n.normalize(DrillType::VerticalJump, "0").score, 0);
        assert_eq!(n.normalize(DrillType::VerticalJump, "50").score, 100);
    }

    #[test]
    fn test_out_of_range_values_saturate() {
        let n = normalizer();
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "2.1").score, 100);
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "14").score, 0);
        assert_eq!(n.normalize(DrillType::Catching, "35").score, 100);
        assert_eq!(n.normalize(DrillType::Catching, "-4").score, 0);
    }

    #[test]
    fn test_rounding_is_half_up() {
        let n = normalizer();
        // 100 * 0.25 / 50 = 0.5
        assert_eq!(n.normalize(DrillType::VerticalJump, "0.25").score, 1);
        // 100 * 1.25 / 50 = 2.5
        assert_eq!(n.normalize(DrillType::VerticalJump, "1.25").score, 3);
        // 100 * 31.25 / 50 = 62.5
        assert_eq!(n.normalize(DrillType::VerticalJump, "31.25").score, 63);
        // 100 * 1.2 / 50 = 2.4
        assert_eq!(n.normalize(DrillType::VerticalJump, "1.2").score, 2);
    }

    #[test]
    fn test_rounding_is_half_up_for_hundredth_times() {
        let n = normalizer();
        // 100 * (10 - 5.11) / 6 = 81.5, computed as 81.49999999999999
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "5.11").score, 82);
        // 79.5, 72.5, 63.5
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "5.23 sec").score, 80);
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "5.65").score, 73);
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "6.19").score, 64);
        // 100 * (20 - 19.82) / 12 = 1.5
        assert_eq!(n.normalize(DrillType::Agility, "19.82").score, 2);
        // 100 * (20 - 12.5) / 12 = 62.5
        assert_eq!(n.normalize(DrillType::Agility, "12.5").score, 63);
        // Just under a half still rounds down
        assert_eq!(n.normalize(DrillType::FortyMeterDash, "5.12").score, 81);
    }

    #[test]
    fn test_unparseable_returns_zero_with_status() {
        let result = normalizer().normalize(DrillType::Agility, "scratched");
        assert_eq!(result.score, 0);
        assert_eq!(result.status, NormalizeStatus::Unparseable);
        assert!(!result.is_scored());
    }

    #[test]
    fn test_unconfigured_drill_returns_zero_with_status() {
        let mut table = CalibrationTable::default();
        table.set(DrillType::Throwing, None);
        let n = Normalizer::new(table);

        let result = n.normalize(DrillType::Throwing, "80");
        assert_eq!(result.score, 0);
        assert_eq!(result.status, NormalizeStatus::Unconfigured);

        // Other drills are unaffected
        assert!(n.normalize(DrillType::Catching, "10").is_scored());
    }

    #[test]
    fn test_degenerate_range_is_always_full_marks() {
        let mut table = CalibrationTable::default();
        table.set(
            DrillType::Catching,
            Some(Calibration::higher_is_better(10.0, 10.0)),
        );
        let n = Normalizer::new(table);

        assert_eq!(n.normalize(DrillType::Catching, "0").score, 100);
        assert_eq!(n.normalize(DrillType::Catching, "25").score, 100);
        // Still nothing to score without a number
        assert_eq!(n.normalize(DrillType::Catching, "n/a").score, 0);
    }

    #[test]
    fn test_normalize_value_matches_text_path() {
        let n = normalizer();
        assert_eq!(
            n.normalize_value(DrillType::Agility, 11.0),
            n.normalize(DrillType::Agility, "11.0 s")
        );
        assert_eq!(
            n.normalize_value(DrillType::Agility, f64::NAN).status,
            NormalizeStatus::Unparseable
        );
    }

    #[test]
    fn test_calibration_table_toml() {
        let toml_str = r#"
[40m_dash]
direction = "lower_is_better"
min = 5.0
max = 9.0

[catching]
direction = "higher_is_better"
min = 0.0
max = 10.0
"#;
        let table: CalibrationTable = toml::from_str(toml_str).unwrap();
        assert_eq!(
            table.get(DrillType::FortyMeterDash),
            Some(&Calibration::lower_is_better(5.0, 9.0))
        );
        assert!(table.get(DrillType::VerticalJump).is_none());
        assert_eq!(table.get(DrillType::Catching).unwrap().max, 10.0);
    }
}
