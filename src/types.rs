//! Common types used throughout the combine tracker

use crate::error::CombineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for players, assigned by storage in insertion order
pub type PlayerId = u64;

/// Unique identifier for a single drill attempt
pub type AttemptId = Uuid;

/// The closed set of drills measured at a combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DrillType {
    #[serde(rename = "40m_dash")]
    FortyMeterDash,
    #[serde(rename = "vertical_jump")]
    VerticalJump,
    #[serde(rename = "agility")]
    Agility,
    #[serde(rename = "throwing")]
    Throwing,
    #[serde(rename = "catching")]
    Catching,
}

impl DrillType {
    /// Every drill, in display order
    pub const ALL: [DrillType; 5] = [
        DrillType::FortyMeterDash,
        DrillType::VerticalJump,
        DrillType::Agility,
        DrillType::Throwing,
        DrillType::Catching,
    ];

    /// Wire name used in config files, rosters and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            DrillType::FortyMeterDash => "40m_dash",
            DrillType::VerticalJump => "vertical_jump",
            DrillType::Agility => "agility",
            DrillType::Throwing => "throwing",
            DrillType::Catching => "catching",
        }
    }
}

impl fmt::Display for DrillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DrillType {
    type Err = CombineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DrillType::ALL
            .into_iter()
            .find(|drill| drill.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CombineError::UnknownDrill {
                name: name.to_string(),
            })
    }
}

/// Whether a smaller or a larger raw measurement is the better result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// A registered combine participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub number: Option<u32>,
    /// Age in years; cohorts are formed from age groups
    pub age: u32,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Player registration data before storage assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    pub age: u32,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            number: None,
            age,
            photo_url: None,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Check the registration data before it reaches storage
    pub fn validate(&self) -> Result<(), CombineError> {
        if self.name.trim().is_empty() {
            return Err(CombineError::InvalidPlayer {
                reason: "Player name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Inclusive age range selecting a ranking cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeGroup {
    pub min_age: u32,
    pub max_age: u32,
}

impl AgeGroup {
    pub fn new(min_age: u32, max_age: u32) -> Result<Self, CombineError> {
        if min_age > max_age {
            return Err(CombineError::InvalidAgeGroup {
                input: format!("{}-{}", min_age, max_age),
                reason: "Min age cannot be greater than max age".to_string(),
            });
        }
        Ok(Self { min_age, max_age })
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min_age, self.max_age)
    }
}

impl FromStr for AgeGroup {
    type Err = CombineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CombineError::InvalidAgeGroup {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (min, max) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("missing '-' separator"))?;
        let min_age: u32 = min
            .trim()
            .parse()
            .map_err(|_| invalid("min age is not a whole number"))?;
        let max_age: u32 = max
            .trim()
            .parse()
            .map_err(|_| invalid("max age is not a whole number"))?;

        if min_age > max_age {
            return Err(invalid("Min age cannot be greater than max age"));
        }
        Ok(Self { min_age, max_age })
    }
}

/// A raw measurement as submitted: either a bare number or free-form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Number(f64),
    Text(String),
}

impl RawInput {
    pub fn to_text(&self) -> String {
        match self {
            RawInput::Number(value) => value.to_string(),
            RawInput::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        RawInput::Text(text.to_string())
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_type_round_trips_wire_names() {
        for drill in DrillType::ALL {
            assert_eq!(drill.as_str().parse::<DrillType>().unwrap(), drill);
        }
        assert_eq!(
            " 40M_DASH ".parse::<DrillType>().unwrap(),
            DrillType::FortyMeterDash
        );
    }

    #[test]
    fn test_unknown_drill_is_rejected() {
        let err = "shuttle_run".parse::<DrillType>().unwrap_err();
        assert!(matches!(err, CombineError::UnknownDrill { ref name } if name == "shuttle_run"));
    }

    #[test]
    fn test_drill_type_serde_uses_wire_names() {
        let json = serde_json::to_string(&DrillType::FortyMeterDash).unwrap();
        assert_eq!(json, "\"40m_dash\"");
        let parsed: DrillType = serde_json::from_str("\"vertical_jump\"").unwrap();
        assert_eq!(parsed, DrillType::VerticalJump);
    }

    #[test]
    fn test_age_group_parsing() {
        let group: AgeGroup = "6-8".parse().unwrap();
        assert_eq!(group, AgeGroup { min_age: 6, max_age: 8 });
        assert!(group.contains(6));
        assert!(group.contains(8));
        assert!(!group.contains(9));
        assert_eq!(group.to_string(), "6-8");

        assert!("9-11".parse::<AgeGroup>().is_ok());
        assert!("8-6".parse::<AgeGroup>().is_err());
        assert!("eight".parse::<AgeGroup>().is_err());
        assert!("6-".parse::<AgeGroup>().is_err());
        assert!(AgeGroup::new(10, 9).is_err());
    }

    #[test]
    fn test_new_player_validation() {
        assert!(NewPlayer::new("Sam", 9).validate().is_ok());
        assert!(NewPlayer::new("   ", 9).validate().is_err());
    }

    #[test]
    fn test_raw_input_accepts_numbers_and_text() {
        let number: RawInput = serde_json::from_str("5.5").unwrap();
        assert_eq!(number, RawInput::Number(5.5));
        assert_eq!(number.to_text(), "5.5");

        let text: RawInput = serde_json::from_str("\"5.12 sec\"").unwrap();
        assert_eq!(text.to_text(), "5.12 sec");
    }
}
