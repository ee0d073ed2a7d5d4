//! The shared slot: one versioned snapshot per game.

use crate::errors::SyncError;
use crate::events::{EventBus, EventSubscription, SlotEvent};
use ledger_engine::state::GameState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

/// A snapshot as stored in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Published {
    /// Bumped by one on every publish; the first publish is version 1
    pub version: u64,
    pub state: GameState,
}

/// What a publish does when the slot moved on since the writer last read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Overwrite the newer snapshot and log it
    #[default]
    LastWriterWins,
    /// Fail with [`SyncError::StaleSnapshot`]
    RejectStale,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::LastWriterWins => "last-writer-wins",
            ConflictPolicy::RejectStale => "reject-stale",
        }
    }

    /// Version for a write based on `base_version` into a slot at `current`.
    pub fn next_version(
        &self,
        game_id: &str,
        base_version: u64,
        current: u64,
    ) -> Result<u64, SyncError> {
        if base_version < current {
            match self {
                ConflictPolicy::LastWriterWins => {
                    tracing::warn!(
                        game_id = %game_id,
                        base_version,
                        overwritten_version = current,
                        "publishing over a newer snapshot"
                    );
                }
                ConflictPolicy::RejectStale => {
                    return Err(SyncError::StaleSnapshot {
                        game_id: game_id.to_string(),
                        expected: base_version,
                        actual: current,
                    });
                }
            }
        }
        Ok(current + 1)
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-writer-wins" | "lww" => Ok(ConflictPolicy::LastWriterWins),
            "reject-stale" => Ok(ConflictPolicy::RejectStale),
            other => Err(format!(
                "unknown conflict policy '{other}' (expected last-writer-wins or reject-stale)"
            )),
        }
    }
}

/// Storage for the per-game shared slot.
///
/// `publish` writes the full snapshot and returns the new version. Every
/// successful publish is announced on [`SnapshotStore::events`].
pub trait SnapshotStore: Send + Sync {
    fn load(&self, game_id: &str) -> Result<Option<Published>, SyncError>;

    fn publish(&self, game_id: &str, base_version: u64, state: &GameState)
        -> Result<u64, SyncError>;

    fn events(&self) -> &EventBus;

    fn subscribe(&self, game_id: &str) -> EventSubscription {
        self.events().subscribe(game_id)
    }
}

/// In-process slots, shared by every replica holding the same store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Published>>,
    policy: ConflictPolicy,
    events: EventBus,
}

impl MemoryStore {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            policy,
            events: EventBus::new(),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, game_id: &str) -> Result<Option<Published>, SyncError> {
        let guard = self.slots.read().map_err(|_| SyncError::StoragePoisoned)?;
        Ok(guard.get(game_id).cloned())
    }

    fn publish(
        &self,
        game_id: &str,
        base_version: u64,
        state: &GameState,
    ) -> Result<u64, SyncError> {
        let version = {
            let mut guard = self.slots.write().map_err(|_| SyncError::StoragePoisoned)?;
            let current = guard.get(game_id).map_or(0, |p| p.version);
            let version = self.policy.next_version(game_id, base_version, current)?;
            guard.insert(
                game_id.to_string(),
                Published {
                    version,
                    state: state.clone(),
                },
            );
            version
        };

        tracing::info!(game_id = %game_id, version, "snapshot published");
        self.events.broadcast(SlotEvent {
            game_id: game_id.to_string(),
            version,
            state: Box::new(state.clone()),
        });
        Ok(version)
    }

    fn events(&self) -> &EventBus {
        &self.events
    }
}
