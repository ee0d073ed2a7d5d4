//! Plain-text rendering of a game snapshot.

use ledger_engine::seat::Seat;
use ledger_engine::state::{GamePhase, GameState};

pub fn format_phase(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Waiting => "waiting",
        GamePhase::Betting => "betting",
        GamePhase::Showdown => "showdown",
        GamePhase::EndOfHand => "end of hand",
    }
}

/// Position and status markers for a seat, e.g. `D BB` or `SB all-in`.
pub fn format_markers(seat: &Seat) -> String {
    let mut markers = Vec::new();
    if seat.is_dealer {
        markers.push("D");
    }
    if seat.is_small_blind {
        markers.push("SB");
    }
    if seat.is_big_blind {
        markers.push("BB");
    }
    if seat.is_folded {
        markers.push("folded");
    } else if seat.is_all_in {
        markers.push("all-in");
    }
    markers.join(" ")
}

/// Header line plus one row per seat; `>` marks the seat to act.
///
/// ```rust
/// use ledger_cli::formatters::format_table;
/// use ledger_engine::request::create_game;
/// use ledger_engine::rules::TableRules;
///
/// let game = create_game(&TableRules::default(), "K7Q2XZ", "Ann", "player_1");
/// let text = format_table(&game);
/// assert!(text.starts_with("Game K7Q2XZ | waiting | pot 0"));
/// assert!(text.contains("Ann"));
/// ```
pub fn format_table(state: &GameState) -> String {
    let mut lines = vec![format!(
        "Game {} | {} | pot {} | to call {} | min raise {}",
        state.game_id.as_deref().unwrap_or("-"),
        format_phase(state.game_phase),
        state.pot,
        state.current_bet_to_call,
        state.min_raise_amount,
    )];
    let name_width = state
        .seats
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    lines.push(format!(
        "   #  {:<name_width$}  {:>6}  {:>5}",
        "name", "stack", "bet"
    ));
    for (i, seat) in state.seats.iter().enumerate() {
        let pointer = if state.current_player_index == Some(i) {
            '>'
        } else {
            ' '
        };
        let row = format!(
            " {} {:>2}  {:<name_width$}  {:>6}  {:>5}  {}",
            pointer,
            i,
            seat.name,
            seat.stack,
            seat.current_bet,
            format_markers(seat),
        );
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

/// The last `limit` history entries, oldest first.
pub fn recent_history(state: &GameState, limit: usize) -> &[String] {
    let start = state.hand_history.len().saturating_sub(limit);
    &state.hand_history[start..]
}
