use thiserror::Error;

use crate::action::PlayerId;
use crate::state::TurnPhase;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("expected phase {expected:?}, game is in {actual:?}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("attempted to draw from an empty deck")]
    EmptyDeck,
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected player actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("action index {0} is not take (0) or pass (1)")]
    UnknownAction(usize),
    #[error("cannot pass with {chips} chips")]
    NoChipsToPass { chips: i32 },
    #[error("no card is currently revealed")]
    NoCardRevealed,
}
