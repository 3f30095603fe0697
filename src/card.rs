use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Face value of a No Thanks! card.
pub type Card = u8;

pub const MIN_CARD_VALUE: Card = 3;
pub const MAX_CARD_VALUE: Card = 35;
/// Number of distinct values in the full card range.
pub const CARD_RANGE: usize = (MAX_CARD_VALUE - MIN_CARD_VALUE + 1) as usize;
pub const DECK_SIZE: usize = 24;
pub const NUM_PLAYERS: usize = 3;
pub const STARTING_CHIPS: i32 = 11;
pub const TOTAL_CHIPS: i32 = STARTING_CHIPS * NUM_PLAYERS as i32;

/// Returns true if the value lies within the playable card range.
#[inline]
pub fn is_valid_card(card: Card) -> bool {
    (MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&card)
}

/// Zero-based slot of a card within the `CARD_RANGE` span.
#[inline]
pub fn card_index(card: Card) -> usize {
    debug_assert!(is_valid_card(card));
    (card - MIN_CARD_VALUE) as usize
}

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub deck_size: usize,
    pub min_card: Card,
    pub max_card: Card,
    pub starting_chips: i32,
}

impl GameSettings {
    pub fn standard() -> Self {
        Self {
            num_players: NUM_PLAYERS,
            deck_size: DECK_SIZE,
            min_card: MIN_CARD_VALUE,
            max_card: MAX_CARD_VALUE,
            starting_chips: STARTING_CHIPS,
        }
    }

    /// Standard rules with a shortened deck, mostly useful for quick simulations.
    pub fn with_deck_size(deck_size: usize) -> Result<Self, GameError> {
        let settings = Self {
            deck_size,
            ..Self::standard()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn population(&self) -> usize {
        (self.max_card - self.min_card + 1) as usize
    }

    pub fn total_chips(&self) -> i32 {
        self.starting_chips * self.num_players as i32
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_players != NUM_PLAYERS {
            return Err(GameError::InvalidConfiguration("exactly three players are supported"));
        }
        if self.deck_size == 0 {
            return Err(GameError::InvalidConfiguration("deck size must be positive"));
        }
        if self.deck_size > self.population() {
            return Err(GameError::InvalidConfiguration(
                "deck size exceeds the number of distinct card values",
            ));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_settings_are_valid() {
        let settings = GameSettings::standard();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.population(), 33);
        assert_eq!(settings.total_chips(), TOTAL_CHIPS);
    }

    #[test]
    fn oversized_deck_is_rejected() {
        assert!(matches!(
            GameSettings::with_deck_size(34),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(GameSettings::with_deck_size(33).is_ok());
    }

    #[test]
    fn card_index_spans_range() {
        assert_eq!(card_index(MIN_CARD_VALUE), 0);
        assert_eq!(card_index(MAX_CARD_VALUE), CARD_RANGE - 1);
        assert!(!is_valid_card(2));
        assert!(!is_valid_card(36));
    }
}
