//! Circular seat traversal.
//!
//! Seats are addressed by index into a fixed-order slice and every walk is
//! modulo the seat count.

use crate::seat::Seat;

/// Returns the first seat after `from` (exclusive, wrapping) that can act.
///
/// `from` itself is never returned: `None` means every *other* seat is folded
/// or all-in.
///
/// ```
/// use ledger_engine::seat::Seat;
/// use ledger_engine::turn::next_active;
///
/// let mut seats: Vec<Seat> = (0..3).map(|i| Seat::new(format!("p{i}"), "x", 100, i)).collect();
/// seats[1].is_folded = true;
/// assert_eq!(next_active(&seats, 0), Some(2));
/// assert_eq!(next_active(&seats, 2), Some(0));
/// ```
pub fn next_active(seats: &[Seat], from: usize) -> Option<usize> {
    let n = seats.len();
    if n == 0 {
        return None;
    }
    (1..n)
        .map(|step| (from + step) % n)
        .find(|&i| seats[i].can_act())
}

/// Like [`next_active`], but falls back to `from` itself when it is the only
/// seat able to act.
pub fn first_active_after(seats: &[Seat], from: usize) -> Option<usize> {
    next_active(seats, from).or_else(|| seats.get(from).filter(|s| s.can_act()).map(|_| from))
}

/// Whether walking forward from `from` to `to` (exclusive start, inclusive
/// end) lands on or steps over `target`.
pub fn reaches(seat_count: usize, from: usize, to: usize, target: usize) -> bool {
    if seat_count == 0 {
        return false;
    }
    let distance = |a: usize, b: usize| (b + seat_count - a % seat_count) % seat_count;
    let span = match distance(from, to) {
        0 => seat_count,
        d => d,
    };
    let offset = distance(from, target);
    offset != 0 && offset <= span
}
