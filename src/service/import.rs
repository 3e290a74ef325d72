//! Roster import
//!
//! A roster is a JSON document listing players and the drill results they
//! recorded. Items are applied one at a time: a bad item is reported and the
//! rest of the batch still goes through.

use crate::error::Result;
use crate::scoring::NormalizeStatus;
use crate::service::combine::CombineService;
use crate::types::{DrillType, NewPlayer, PlayerId, RawInput};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A roster file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub players: Vec<RosterPlayer>,
}

/// One player entry of a roster, with the results recorded for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(flatten)]
    pub player: NewPlayer,
    #[serde(default)]
    pub results: Vec<RosterResult>,
}

/// A drill result as written in a roster; the drill name is checked on import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResult {
    pub drill: String,
    pub raw: RawInput,
}

/// Something the import could not apply cleanly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportIssue {
    /// Zero-based position of the player in the roster
    pub player_index: usize,
    pub player_name: String,
    pub message: String,
}

/// Outcome of a roster import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Storage ids of the players created, in roster order
    pub player_ids: Vec<PlayerId>,
    pub results_recorded: usize,
    /// Results stored with score 0 because they could not be normalized
    pub warnings: Vec<ImportIssue>,
    /// Items that were skipped
    pub failures: Vec<ImportIssue>,
}

impl ImportReport {
    pub fn players_created(&self) -> usize {
        self.player_ids.len()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.failures.is_empty()
    }
}

impl RosterFile {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse roster: invalid JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid roster file {}", path.display()))
    }
}

/// Register every roster player and record their results
pub fn import_roster(service: &CombineService, roster: &RosterFile) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (player_index, entry) in roster.players.iter().enumerate() {
        let issue = |message: String| ImportIssue {
            player_index,
            player_name: entry.player.name.clone(),
            message,
        };

        let player = match service.register_player(entry.player.clone()) {
            Ok(player) => player,
            Err(e) => {
                warn!("Skipping roster entry {}: {}", player_index, e);
                report.failures.push(issue(e.to_string()));
                continue;
            }
        };
        report.player_ids.push(player.id);

        for result in &entry.results {
            let drill: DrillType = match result.drill.parse() {
                Ok(drill) => drill,
                Err(e) => {
                    warn!("Skipping result for player {}: {}", player.id, e);
                    report.failures.push(issue(e.to_string()));
                    continue;
                }
            };

            let raw = result.raw.to_text();
            let attempt = match service.submit_result(player.id, drill, &raw) {
                Ok(attempt) => attempt,
                Err(e) => {
                    warn!("Failed to record {} result for player {}: {}", drill, player.id, e);
                    report.failures.push(issue(e.to_string()));
                    continue;
                }
            };
            report.results_recorded += 1;

            match attempt.status() {
                NormalizeStatus::Scored => {}
                NormalizeStatus::Unparseable => report.warnings.push(issue(format!(
                    "{} result '{}' is not a number; scored 0",
                    drill, raw
                ))),
                NormalizeStatus::Unconfigured => report.warnings.push(issue(format!(
                    "{} has no calibration; scored 0",
                    drill
                ))),
            }
        }
    }

    info!(
        "Roster import: {} players, {} results, {} warnings, {} failures",
        report.players_created(),
        report.results_recorded,
        report.warnings.len(),
        report.failures.len()
    );
    Ok(report)
}
