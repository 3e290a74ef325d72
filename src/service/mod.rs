//! Service layer for the combine tracker
//!
//! This module ties storage, the scoring engine and metrics together into
//! the operations an event runs: registering players, recording results,
//! and reading back summaries and rankings.

pub mod combine;
pub mod import;

pub use combine::{CombineService, PlayerRanking, PlayerSummary, ResetSummary};
pub use import::{import_roster, ImportIssue, ImportReport, RosterFile, RosterPlayer, RosterResult};
