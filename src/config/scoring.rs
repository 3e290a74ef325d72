//! Scoring configuration: per-event calibration ranges and drill weights

use crate::error::CombineError;
use crate::scoring::{CalibrationTable, DrillWeights};
use crate::types::DrillType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub calibration: CalibrationTable,
    #[serde(default)]
    pub weights: DrillWeights,
}

impl ScoringConfig {
    /// Reject calibration ranges and weights the engine cannot use
    pub fn validate(&self) -> Result<(), CombineError> {
        for drill in DrillType::ALL {
            if let Some(calibration) = self.calibration.get(drill) {
                if !calibration.min.is_finite() || !calibration.max.is_finite() {
                    return Err(CombineError::ConfigurationError {
                        message: format!("Calibration bounds for {} must be finite", drill),
                    });
                }
                if calibration.min > calibration.max {
                    return Err(CombineError::ConfigurationError {
                        message: format!(
                            "Calibration min ({}) for {} is greater than max ({})",
                            calibration.min, drill, calibration.max
                        ),
                    });
                }
            }

            let weight = self.weights.get(drill);
            if !weight.is_finite() || weight < 0.0 {
                return Err(CombineError::ConfigurationError {
                    message: format!("Weight for {} must be a non-negative number", drill),
                });
            }
        }

        Ok(())
    }

    /// Drills that have a weight but no calibration range; every result on
    /// them scores 0 and pulls the composite down
    pub fn unconfigured_drills(&self) -> Vec<DrillType> {
        DrillType::ALL
            .into_iter()
            .filter(|drill| self.weights.get(*drill) > 0.0)
            .filter(|drill| self.calibration.get(*drill).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Calibration;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.unconfigured_drills().is_empty());
    }

    #[test]
    fn test_degenerate_range_and_zero_weights_are_valid() {
        let mut config = ScoringConfig::default();
        config
            .calibration
            .set(DrillType::Catching, Some(Calibration::higher_is_better(5.0, 5.0)));
        config.weights = DrillWeights::zero();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut config = ScoringConfig::default();
        config
            .calibration
            .set(DrillType::Agility, Some(Calibration::lower_is_better(20.0, 8.0)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_weights_are_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.set(DrillType::Throwing, -0.1);
        assert!(config.validate().is_err());

        config.weights.set(DrillType::Throwing, f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unconfigured_drills_listed() {
        let mut config = ScoringConfig::default();
        config.calibration.set(DrillType::VerticalJump, None);
        assert_eq!(config.unconfigured_drills(), vec![DrillType::VerticalJump]);

        // Without weight a missing calibration has no effect on the composite
        config.calibration.set(DrillType::Agility, None);
        config.weights.set(DrillType::Agility, 0.0);
        assert_eq!(config.unconfigured_drills(), vec![DrillType::VerticalJump]);
    }
}
