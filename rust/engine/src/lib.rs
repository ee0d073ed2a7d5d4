//! # ledger-engine: Shared Poker Ledger Core
//!
//! The turn-based wagering state machine behind a multi-seat chip ledger:
//! blinds, fold/call/raise, pot accumulation and payout when every other seat
//! has folded. Cards, streets and showdown evaluation are not modelled.
//!
//! Every transition is a pure function from one [`state::GameState`] to the
//! next. Nothing here performs I/O or keeps state between calls, so a request
//! log replays to the same snapshots every time.
//!
//! ## Core Modules
//!
//! - [`seat`] - Seat data and chip movement
//! - [`state`] - Game snapshot and lifecycle phases
//! - [`turn`] - Circular turn order
//! - [`hand`] - Dealer rotation and blind posting
//! - [`betting`] - Player actions, round closing and pot award
//! - [`request`] - The request enum and the [`request::reduce`] transition
//! - [`rules`] - Table stakes and raise validation
//! - [`invariants`] - Executable snapshot invariants
//! - [`errors`] - Error types for rejected requests
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_engine::betting::PlayerAction;
//! use ledger_engine::request::{create_game, join_game, reduce, Request};
//! use ledger_engine::rules::TableRules;
//! use ledger_engine::state::GamePhase;
//!
//! let rules = TableRules::default();
//! let game = create_game(&rules, "K7Q2XZ", "Ann", "player_1");
//! let game = join_game(&rules, &game, "Bo", "player_2");
//! let game = reduce(&rules, &game, Request::StartHand).unwrap();
//!
//! // heads-up: the small blind acts first and folds
//! let game = reduce(&rules, &game, Request::player_action(PlayerAction::Fold)).unwrap();
//! assert_eq!(game.game_phase, GamePhase::EndOfHand);
//! assert_eq!(game.total_chips(), 2_000);
//! ```

pub mod betting;
pub mod errors;
pub mod hand;
pub mod invariants;
pub mod request;
pub mod rules;
pub mod seat;
pub mod state;
pub mod turn;
