//! # ledger-sync: Shared Snapshot Replication
//!
//! Every session of a game keeps its own copy of the latest
//! [`GameState`](ledger_engine::state::GameState), applies requests locally,
//! and publishes the full snapshot to a shared slot. Other sessions pick the
//! snapshot up from a change notification and replace their copy wholesale.
//!
//! - [`store`] - The [`store::SnapshotStore`] slot abstraction and the in-memory store
//! - [`dir_store`] - One JSON file per game on disk
//! - [`events`] - Change notifications over bounded channels
//! - [`replica`] - A session's view of one game
//! - [`ids`] - Game and player identifiers
//! - [`logging`] - Subscriber setup and log capture for tests
//!
//! Publishing is last-writer-wins by default: two sessions acting on the same
//! base snapshot race, and the later write replaces the earlier one. The
//! overwrite is logged. [`store::ConflictPolicy::RejectStale`] turns it into a
//! [`errors::SyncError::StaleSnapshot`] instead.

pub mod dir_store;
pub mod errors;
pub mod events;
pub mod ids;
pub mod logging;
pub mod replica;
pub mod store;

pub use errors::SyncError;
pub use replica::Replica;
pub use store::{ConflictPolicy, MemoryStore, Published, SnapshotStore};
