//! Drill weights for the composite score.
//!
//! Weights need not sum to 1.0; the aggregator divides by the total weight.

use crate::types::DrillType;
use serde::{Deserialize, Serialize};

/// One non-negative weight per drill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrillWeights {
    #[serde(rename = "40m_dash", default)]
    pub forty_meter_dash: f64,
    #[serde(default)]
    pub vertical_jump: f64,
    #[serde(default)]
    pub agility: f64,
    #[serde(default)]
    pub throwing: f64,
    #[serde(default)]
    pub catching: f64,
}

impl Default for DrillWeights {
    fn default() -> Self {
        Self {
            forty_meter_dash: 0.30,
            vertical_jump: 0.20,
            agility: 0.20,
            throwing: 0.15,
            catching: 0.15,
        }
    }
}

impl DrillWeights {
    /// All weights zero
    pub fn zero() -> Self {
        Self {
            forty_meter_dash: 0.0,
            vertical_jump: 0.0,
            agility: 0.0,
            throwing: 0.0,
            catching: 0.0,
        }
    }

    pub fn get(&self, drill: DrillType) -> f64 {
        match drill {
            DrillType::FortyMeterDash => self.forty_meter_dash,
            DrillType::VerticalJump => self.vertical_jump,
            DrillType::Agility => self.agility,
            DrillType::Throwing => self.throwing,
            DrillType::Catching => self.catching,
        }
    }

    pub fn set(&mut self, drill: DrillType, weight: f64) {
        let slot = match drill {
            DrillType::FortyMeterDash => &mut self.forty_meter_dash,
            DrillType::VerticalJump => &mut self.vertical_jump,
            DrillType::Agility => &mut self.agility,
            DrillType::Throwing => &mut self.throwing,
            DrillType::Catching => &mut self.catching,
        };
        *slot = weight;
    }

    pub fn total(&self) -> f64 {
        DrillType::ALL.iter().map(|drill| self.get(*drill)).sum()
    }
}
