//! The request boundary: one discriminated request in, one snapshot out.

use serde::{Deserialize, Serialize};

use crate::betting::{apply_action, ActionKind, PlayerAction};
use crate::errors::GameError;
use crate::hand::start_hand;
use crate::rules::TableRules;
use crate::seat::Seat;
use crate::state::{GamePhase, GameState};

/// A request against a game snapshot.
///
/// Serialized as `{"type": "PLAYER_ACTION", "payload": {...}}`, the same
/// envelope the shared slot carries between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    CreateGame {
        game_id: String,
        player_name: String,
        player_id: String,
    },
    JoinGame {
        player_name: String,
        player_id: String,
        existing_state: Box<GameState>,
    },
    StartHand,
    PlayerAction {
        action: ActionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<u32>,
    },
    SyncState(Box<GameState>),
}

impl Request {
    pub fn player_action(action: PlayerAction) -> Self {
        Request::PlayerAction {
            action: action.kind(),
            amount: action.amount(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Request::CreateGame { .. } => "CREATE_GAME",
            Request::JoinGame { .. } => "JOIN_GAME",
            Request::StartHand => "START_HAND",
            Request::PlayerAction { .. } => "PLAYER_ACTION",
            Request::SyncState(_) => "SYNC_STATE",
        }
    }
}

/// The whole transition function: `(snapshot, request) → snapshot`.
///
/// Deterministic and free of I/O, so any log of requests can be replayed to
/// rebuild a game.
///
/// # Examples
///
/// ```
/// use ledger_engine::request::{reduce, Request};
/// use ledger_engine::rules::TableRules;
/// use ledger_engine::state::{GamePhase, GameState};
///
/// let rules = TableRules::default();
/// let created = reduce(&rules, &GameState::initial(&rules), Request::CreateGame {
///     game_id: "K7Q2XZ".into(),
///     player_name: "Ann".into(),
///     player_id: "player_1".into(),
/// }).unwrap();
/// let joined = reduce(&rules, &created, Request::JoinGame {
///     player_name: "Bo".into(),
///     player_id: "player_2".into(),
///     existing_state: Box::new(created.clone()),
/// }).unwrap();
/// let dealt = reduce(&rules, &joined, Request::StartHand).unwrap();
/// assert_eq!(dealt.game_phase, GamePhase::Betting);
/// ```
pub fn reduce(
    rules: &TableRules,
    state: &GameState,
    request: Request,
) -> Result<GameState, GameError> {
    let result = match request {
        Request::SyncState(payload) => Ok(*payload),
        Request::CreateGame {
            game_id,
            player_name,
            player_id,
        } => Ok(create_game(rules, game_id, player_name, player_id)),
        Request::JoinGame {
            player_name,
            player_id,
            existing_state,
        } => Ok(join_game(rules, &existing_state, player_name, player_id)),
        Request::StartHand => start_hand(rules, state),
        Request::PlayerAction { action, amount } => {
            PlayerAction::from_parts(action, amount).and_then(|a| apply_action(state, a))
        }
    };
    if let Err(e) = &result {
        tracing::warn!(game_id = ?state.game_id, error = %e, "request rejected");
    }
    result
}

/// A fresh snapshot holding only the creator's seat.
pub fn create_game(
    rules: &TableRules,
    game_id: impl Into<String>,
    player_name: impl Into<String>,
    player_id: impl Into<String>,
) -> GameState {
    let player_name = player_name.into();
    let mut state = GameState::initial(rules);
    state.game_id = Some(game_id.into());
    state.log(format!("Game created by {player_name}."));
    state.seats.push(Seat::new(
        player_id,
        player_name,
        rules.starting_stack,
        0,
    ));
    state
}

/// Appends a seat for `player_id` unless it is already seated.
///
/// A player joining mid-hand is seated folded and plays from the next hand.
pub fn join_game(
    rules: &TableRules,
    existing: &GameState,
    player_name: impl Into<String>,
    player_id: impl Into<String>,
) -> GameState {
    let player_id = player_id.into();
    if existing.seat_by_id(&player_id).is_some() {
        return existing.clone();
    }
    let player_name = player_name.into();
    let mut state = existing.clone();
    let mut seat = Seat::new(
        player_id,
        player_name.clone(),
        rules.starting_stack,
        state.seats.len(),
    );
    seat.is_folded = state.game_phase == GamePhase::Betting;
    state.seats.push(seat);
    state.log(format!("{player_name} joined the game."));
    state
}
