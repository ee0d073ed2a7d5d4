//! Slots persisted as one JSON file per game.
//!
//! `<root>/poker-game-<id>.json` holds `{"version": n, "state": {...}}`.
//! Several processes may share a root. A publish holds an exclusive lock on
//! `<root>/poker-game-<id>.lock` from reading the current version until the
//! new file is in place, and writes through a uniquely named temporary file
//! and a rename so a reader never sees a half-written snapshot. Change
//! notifications only reach subscribers in the publishing process.

use crate::errors::SyncError;
use crate::events::{EventBus, SlotEvent};
use crate::ids::slot_key;
use crate::store::{ConflictPolicy, Published, SnapshotStore};
use fs4::fs_std::FileExt;
use ledger_engine::state::GameState;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    policy: ConflictPolicy,
    events: EventBus,
}

impl DirStore {
    /// Opens `root`, creating the directory when missing.
    pub fn open(root: impl Into<PathBuf>, policy: ConflictPolicy) -> Result<Self, SyncError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            policy,
            events: EventBus::new(),
        })
    }

    pub fn slot_path(&self, game_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", slot_key(game_id)))
    }

    /// Game ids with a slot file under the root, sorted.
    pub fn game_ids(&self) -> Result<Vec<String>, SyncError> {
        let prefix = slot_key("");
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(id) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".json"))
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Blocks until this handle holds the game's lock file. The lock is
    /// released when the returned file is dropped.
    fn lock_slot(&self, game_id: &str) -> Result<File, SyncError> {
        let path = self.root.join(format!("{}.lock", slot_key(game_id)));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.lock_exclusive()?;
        Ok(file)
    }
}

impl SnapshotStore for DirStore {
    fn load(&self, game_id: &str) -> Result<Option<Published>, SyncError> {
        let text = match fs::read_to_string(self.slot_path(game_id)) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn publish(
        &self,
        game_id: &str,
        base_version: u64,
        state: &GameState,
    ) -> Result<u64, SyncError> {
        let version = {
            let _lock = self.lock_slot(game_id)?;
            let current = self.load(game_id)?.map_or(0, |p| p.version);
            let version = self.policy.next_version(game_id, base_version, current)?;

            let published = Published {
                version,
                state: state.clone(),
            };
            let mut tmp = NamedTempFile::new_in(&self.root)?;
            serde_json::to_writer_pretty(&mut tmp, &published)?;
            tmp.persist(self.slot_path(game_id)).map_err(|e| e.error)?;
            version
        };

        tracing::info!(
            game_id = %game_id,
            version,
            root = %self.root.display(),
            "snapshot published"
        );
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
