use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, GameSettings};

/// Shared holding area for the revealed card and the chips wagered on it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pool {
    pub card: Option<Card>,
    pub chips: i32,
}

impl Pool {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn revealed(card: Card) -> Self {
        Self {
            card: Some(card),
            chips: 0,
        }
    }

    pub fn with_chips(card: Card, chips: i32) -> Self {
        Self {
            card: Some(card),
            chips,
        }
    }
}

/// Public portion of a player's state. Cards in hand are face up in No Thanks!,
/// chip counts are not.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub cards: Vec<Card>,
    pub is_current: bool,
}

/// Status of the entire game.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// Every player sharing the lowest score is listed.
    Finished { winners: Vec<PlayerId> },
}

impl GameStatus {
    pub fn is_tie(&self) -> bool {
        matches!(self, GameStatus::Finished { winners } if winners.len() > 1)
    }
}

/// Current phase of the active turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// No card is revealed; the current player must draw.
    AwaitingDraw,
    /// A card is revealed and the current player must take or pass.
    AwaitingDecision,
    GameOver,
}

/// Something that happened during play, kept in order by the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEvent {
    Revealed { player: PlayerId, card: Card },
    Took { player: PlayerId, card: Card, chips: i32 },
    Passed { player: PlayerId, card: Card },
    Finished { scores: Vec<i32>, winners: Vec<PlayerId> },
}

/// Game state snapshot tailored for policies and ML agents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub deck_remaining: usize,
    pub pool: Pool,
    pub players: Vec<PlayerPublicState>,
    /// Cards held by `self_player`, sorted ascending.
    pub hand: Vec<Card>,
    pub chips: i32,
}

impl GameStateView {
    pub fn is_my_turn(&self) -> bool {
        self.self_player == self.current_player
    }

    pub fn opponents(&self) -> impl Iterator<Item = &PlayerPublicState> {
        self.players
            .iter()
            .filter(move |player| player.id != self.self_player)
    }
}
