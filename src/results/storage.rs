//! Player and drill result storage
//!
//! This module defines the interface for persisting players and their drill
//! attempts, with an in-memory implementation and a recording mock for tests.

use crate::error::{CombineError, Result};
use crate::results::Attempt;
use crate::types::{AttemptId, NewPlayer, Player, PlayerId};
use crate::utils::current_timestamp;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Trait for combine storage operations
pub trait CombineStorage: Send + Sync {
    /// Store a new player and assign its id
    fn insert_player(&self, player: NewPlayer) -> Result<Player>;

    /// Get a player by id
    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>>;

    /// Get all players in insertion order
    fn list_players(&self) -> Result<Vec<Player>>;

    /// Remove a player and every attempt they own.
    /// Returns the number of attempts removed, or `None` if the player was unknown.
    fn remove_player(&self, player_id: PlayerId) -> Result<Option<usize>>;

    /// Insert a new attempt
    fn store_attempt(&self, attempt: Attempt) -> Result<()>;

    /// Replace the stored attempt with the same id, keeping its position.
    /// Returns `false` without storing anything if that attempt no longer exists.
    fn replace_attempt(&self, attempt: Attempt) -> Result<bool>;

    /// Get an attempt by id
    fn get_attempt(&self, attempt_id: AttemptId) -> Result<Option<Attempt>>;

    /// Remove a single attempt
    fn remove_attempt(&self, attempt_id: AttemptId) -> Result<bool>;

    /// Get a player's attempts in submission order
    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<Attempt>>;

    /// Every player with their attempts, read as one consistent view
    fn snapshot(&self) -> Result<Vec<(Player, Vec<Attempt>)>>;

    /// Remove all players and attempts, returning (players, attempts) removed
    fn clear(&self) -> Result<(usize, usize)>;
}

#[derive(Debug, Default)]
struct StoreState {
    players: BTreeMap<PlayerId, Player>,
    /// Submission order; a replaced attempt keeps its position
    attempts: Vec<Attempt>,
    next_player_id: PlayerId,
}

impl StoreState {
    fn insert_player(&mut self, player: NewPlayer) -> Player {
        self.next_player_id += 1;
        let stored = Player {
            id: self.next_player_id,
            name: player.name,
            number: player.number,
            age: player.age,
            photo_url: player.photo_url,
            created_at: current_timestamp(),
        };
        self.players.insert(stored.id, stored.clone());
        stored
    }

    fn remove_player(&mut self, player_id: PlayerId) -> Option<usize> {
        self.players.remove(&player_id)?;
        let before = self.attempts.len();
        self.attempts.retain(|a| a.player_id() != player_id);
        Some(before - self.attempts.len())
    }

    fn store_attempt(&mut self, attempt: Attempt) -> Result<()> {
        if !self.players.contains_key(&attempt.player_id()) {
            return Err(CombineError::PlayerNotFound {
                player_id: attempt.player_id(),
            }
            .into());
        }

        if self.attempts.iter().any(|a| a.id() == attempt.id()) {
            return Err(CombineError::StorageError {
                message: format!("Drill result {} is already stored", attempt.id()),
            }
            .into());
        }

        self.attempts.push(attempt);
        Ok(())
    }

    fn replace_attempt(&mut self, attempt: Attempt) -> bool {
        match self.attempts.iter_mut().find(|a| a.id() == attempt.id()) {
            Some(existing) => {
                *existing = attempt;
                true
            }
            None => false,
        }
    }

    fn remove_attempt(&mut self, attempt_id: AttemptId) -> bool {
        let before = self.attempts.len();
        self.attempts.retain(|a| a.id() != attempt_id);
        before != self.attempts.len()
    }

    fn attempts_for_player(&self, player_id: PlayerId) -> Vec<Attempt> {
        self.attempts
            .iter()
            .filter(|a| a.player_id() == player_id)
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Vec<(Player, Vec<Attempt>)> {
        self.players
            .values()
            .map(|player| (player.clone(), self.attempts_for_player(player.id)))
            .collect()
    }

    fn clear(&mut self) -> (usize, usize) {
        let counts = (self.players.len(), self.attempts.len());
        self.players.clear();
        self.attempts.clear();
        counts
    }
}

/// In-memory combine storage implementation
#[derive(Debug, Default)]
pub struct InMemoryCombineStorage {
    state: RwLock<StoreState>,
}

impl InMemoryCombineStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| {
            CombineError::StorageError {
                message: "Failed to acquire storage read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| {
            CombineError::StorageError {
                message: "Failed to acquire storage write lock".to_string(),
            }
            .into()
        })
    }
}

impl CombineStorage for InMemoryCombineStorage {
    fn insert_player(&self, player: NewPlayer) -> Result<Player> {
        Ok(self.write()?.insert_player(player))
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        Ok(self.read()?.players.get(&player_id).cloned())
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.read()?.players.values().cloned().collect())
    }

    fn remove_player(&self, player_id: PlayerId) -> Result<Option<usize>> {
        Ok(self.write()?.remove_player(player_id))
    }

    fn store_attempt(&self, attempt: Attempt) -> Result<()> {
        self.write()?.store_attempt(attempt)
    }

    fn replace_attempt(&self, attempt: Attempt) -> Result<bool> {
        Ok(self.write()?.replace_attempt(attempt))
    }

    fn get_attempt(&self, attempt_id: AttemptId) -> Result<Option<Attempt>> {
        Ok(self
            .read()?
            .attempts
            .iter()
            .find(|a| a.id() == attempt_id)
            .cloned())
    }

    fn remove_attempt(&self, attempt_id: AttemptId) -> Result<bool> {
        Ok(self.write()?.remove_attempt(attempt_id))
    }

    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<Attempt>> {
        Ok(self.read()?.attempts_for_player(player_id))
    }

    fn snapshot(&self) -> Result<Vec<(Player, Vec<Attempt>)>> {
        Ok(self.read()?.snapshot())
    }

    fn clear(&self) -> Result<(usize, usize)> {
        Ok(self.write()?.clear())
    }
}

/// Mock storage for testing that records every attempt written
#[derive(Debug, Default)]
pub struct MockCombineStorage {
    inner: InMemoryCombineStorage,
    store_calls: RwLock<Vec<Attempt>>,
}

impl MockCombineStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all store calls made (for testing)
    pub fn get_store_calls(&self) -> Vec<Attempt> {
        self.store_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear store calls (for testing)
    pub fn clear_store_calls(&self) {
        if let Ok(mut calls) = self.store_calls.write() {
            calls.clear();
        }
    }
}

impl CombineStorage for MockCombineStorage {
    fn insert_player(&self, player: NewPlayer) -> Result<Player> {
        self.inner.insert_player(player)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        self.inner.get_player(player_id)
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        self.inner.list_players()
    }

    fn remove_player(&self, player_id: PlayerId) -> Result<Option<usize>> {
        self.inner.remove_player(player_id)
    }

    fn store_attempt(&self, attempt: Attempt) -> Result<()> {
        // Record the call for testing
        if let Ok(mut calls) = self.store_calls.write() {
            calls.push(attempt.clone());
        }
        self.inner.store_attempt(attempt)
    }

    fn replace_attempt(&self, attempt: Attempt) -> Result<bool> {
        if let Ok(mut calls) = self.store_calls.write() {
            calls.push(attempt.clone());
        }
        self.inner.replace_attempt(attempt)
    }

    fn get_attempt(&self, attempt_id: AttemptId) -> Result<Option<Attempt>> {
        self.inner.get_attempt(attempt_id)
    }

    fn remove_attempt(&self, attempt_id: AttemptId) -> Result<bool> {
        self.inner.remove_attempt(attempt_id)
    }

    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<Attempt>> {
        self.inner.attempts_for_player(player_id)
    }

    fn snapshot(&self) -> Result<Vec<(Player, Vec<Attempt>)>> {
        self.inner.snapshot()
    }

    fn clear(&self) -> Result<(usize, usize)> {
        self.inner.clear()
    }
}
