//! Game and player identifiers.

use rand::Rng;
use uuid::Uuid;

const GAME_ID_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A fresh six-character, upper-case base-36 game id such as `K7Q2XZ`.
pub fn new_game_id() -> String {
    game_id_from(&mut rand::rng())
}

pub fn game_id_from<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..GAME_ID_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

pub fn new_player_id() -> String {
    format!("player_{}", Uuid::new_v4().simple())
}

/// Name of the shared slot holding a game's snapshot.
pub fn slot_key(game_id: &str) -> String {
    format!("poker-game-{game_id}")
}

/// Game ids are typed by hand, so accept any case and surrounding blanks.
pub fn normalize_game_id(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
