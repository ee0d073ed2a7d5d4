use thiserror::Error;

/// Rejections produced by [`crate::request::reduce`].
///
/// A rejected request leaves the input snapshot untouched; the caller keeps
/// whatever it already had.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("No hand in progress")]
    HandNotInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("No seat is able to act")]
    NoSeatToAct,
    #[error("Raise requires a target amount")]
    MissingRaiseAmount,
    #[error("Raise to {target} must exceed the bet to call of {to_call}")]
    RaiseNotAboveCall { target: u32, to_call: u32 },
    #[error("Raise to {target} is below the minimum of {minimum}")]
    RaiseBelowMinimum { target: u32, minimum: u32 },
    #[error("Raise to {target} exceeds the seat's maximum of {maximum}")]
    RaiseAboveStack { target: u32, maximum: u32 },
}
