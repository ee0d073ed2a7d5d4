//! A session's local copy of one game.

use crate::errors::SyncError;
use crate::events::{EventSubscription, SlotEvent};
use crate::ids::{new_game_id, new_player_id, normalize_game_id};
use crate::store::SnapshotStore;
use ledger_engine::betting::PlayerAction;
use ledger_engine::request::{reduce, Request};
use ledger_engine::rules::TableRules;
use ledger_engine::state::{GamePhase, GameState};
use std::sync::Arc;

/// One player's view of a shared game.
///
/// Requests are reduced against the local snapshot and the result is
/// published in full. Snapshots published by other sessions arrive through
/// [`Replica::absorb`] (or [`Replica::refresh`]) and replace the local copy.
#[derive(Debug)]
pub struct Replica<S: SnapshotStore> {
    store: Arc<S>,
    rules: TableRules,
    game_id: String,
    player_id: String,
    state: GameState,
    version: u64,
}

impl<S: SnapshotStore> Replica<S> {
    /// Creates a game under a fresh id with `player_name` in seat 0.
    pub fn create(store: Arc<S>, rules: TableRules, player_name: &str) -> Result<Self, SyncError> {
        Self::create_with_ids(store, rules, &new_game_id(), &new_player_id(), player_name)
    }

    pub fn create_with_ids(
        store: Arc<S>,
        rules: TableRules,
        game_id: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<Self, SyncError> {
        let game_id = normalize_game_id(game_id);
        let mut replica = Self {
            store,
            rules,
            game_id: game_id.clone(),
            player_id: player_id.to_string(),
            state: GameState::initial(&rules),
            version: 0,
        };
        replica.dispatch(Request::CreateGame {
            game_id,
            player_name: player_name.to_string(),
            player_id: player_id.to_string(),
        })?;
        tracing::info!(game_id = %replica.game_id, player_id = %replica.player_id, "game created");
        Ok(replica)
    }

    /// Joins the published game `game_id` under a fresh player id.
    pub fn join(
        store: Arc<S>,
        rules: TableRules,
        game_id: &str,
        player_name: &str,
    ) -> Result<Self, SyncError> {
        Self::join_with_id(store, rules, game_id, &new_player_id(), player_name)
    }

    /// Joins as `player_id`; joining again with the same id changes nothing.
    pub fn join_with_id(
        store: Arc<S>,
        rules: TableRules,
        game_id: &str,
        player_id: &str,
        player_name: &str,
    ) -> Result<Self, SyncError> {
        let game_id = normalize_game_id(game_id);
        let published = store
            .load(&game_id)?
            .ok_or_else(|| SyncError::GameNotFound(game_id.clone()))?;
        let already_seated = published.state.seat_by_id(player_id).is_some();

        let mut replica = Self {
            store,
            rules,
            game_id,
            player_id: player_id.to_string(),
            state: published.state.clone(),
            version: published.version,
        };
        if !already_seated {
            replica.dispatch(Request::JoinGame {
                player_name: player_name.to_string(),
                player_id: player_id.to_string(),
                existing_state: Box::new(published.state),
            })?;
            tracing::info!(
                game_id = %replica.game_id,
                player_id = %replica.player_id,
                "player joined"
            );
        }
        Ok(replica)
    }

    /// Resumes the session of an already seated player.
    pub fn attach(
        store: Arc<S>,
        rules: TableRules,
        game_id: &str,
        player_id: &str,
    ) -> Result<Self, SyncError> {
        let game_id = normalize_game_id(game_id);
        let published = store
            .load(&game_id)?
            .ok_or_else(|| SyncError::GameNotFound(game_id.clone()))?;
        if published.state.seat_by_id(player_id).is_none() {
            return Err(SyncError::NotSeated {
                game_id,
                player_id: player_id.to_string(),
            });
        }
        Ok(Self {
            store,
            rules,
            game_id,
            player_id: player_id.to_string(),
            state: published.state,
            version: published.version,
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Slot version the local snapshot was read from or published as.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_my_turn(&self) -> bool {
        self.state.game_phase == GamePhase::Betting
            && self
                .state
                .current_seat()
                .is_some_and(|s| s.id == self.player_id)
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.store.subscribe(&self.game_id)
    }

    /// Re-reads the slot and adopts it if it is newer than the local copy.
    pub fn refresh(&mut self) -> Result<bool, SyncError> {
        let published = self
            .store
            .load(&self.game_id)?
            .ok_or_else(|| SyncError::GameNotFound(self.game_id.clone()))?;
        Ok(self.adopt(published.version, published.state))
    }

    /// Deals the next hand. A table that cannot deal yet is left alone
    /// and nothing is published.
    pub fn start_hand(&mut self) -> Result<&GameState, SyncError> {
        self.ensure_seated()?;
        if self.state.game_phase != GamePhase::Betting && !self.state.can_start_hand() {
            tracing::debug!(game_id = %self.game_id, "table cannot deal yet");
            return Ok(&self.state);
        }
        self.dispatch(Request::StartHand)
    }

    /// Submits `action` for this replica's player, who must be the seat to act.
    pub fn act(&mut self, action: PlayerAction) -> Result<&GameState, SyncError> {
        self.ensure_seated()?;
        if self.state.game_phase == GamePhase::Betting && !self.is_my_turn() {
            return Err(SyncError::NotYourTurn {
                player_id: self.player_id.clone(),
            });
        }
        self.dispatch(Request::player_action(action))
    }

    /// Reduces `request` locally, then publishes the result.
    ///
    /// The local copy only changes once the publish succeeded.
    pub fn dispatch(&mut self, request: Request) -> Result<&GameState, SyncError> {
        let name = request.name();
        let next = reduce(&self.rules, &self.state, request)?;
        let version = self.store.publish(&self.game_id, self.version, &next)?;
        tracing::debug!(
            game_id = %self.game_id,
            player_id = %self.player_id,
            request = name,
            version,
            "request applied"
        );
        self.state = next;
        self.version = version;
        Ok(&self.state)
    }

    /// Applies a change notification as `SYNC_STATE`.
    ///
    /// Returns whether the local copy was replaced; events for other games
    /// and versions not newer than the local one are ignored.
    pub fn absorb(&mut self, event: SlotEvent) -> bool {
        if event.game_id != self.game_id {
            return false;
        }
        self.adopt(event.version, *event.state)
    }

    fn adopt(&mut self, version: u64, state: GameState) -> bool {
        if version <= self.version {
            return false;
        }
        match reduce(&self.rules, &self.state, Request::SyncState(Box::new(state))) {
            Ok(next) => {
                self.state = next;
                self.version = version;
                true
            }
            Err(_) => false,
        }
    }

    fn ensure_seated(&self) -> Result<(), SyncError> {
        match self.state.seat_by_id(&self.player_id) {
            Some(_) => Ok(()),
            None => Err(SyncError::NotSeated {
                game_id: self.game_id.clone(),
                player_id: self.player_id.clone(),
            }),
        }
    }
}
