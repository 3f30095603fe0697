use std::collections::HashSet;

use rand::Rng;
use rand::seq::index::sample;

use crate::card::{Card, GameSettings, is_valid_card};
use crate::error::GameError;

/// Face-down stack of unplayed cards. Cards are drawn from the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Samples a standard 24-card deck from the 3..=35 range.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        Self::build_with(&GameSettings::standard(), rng)
    }

    /// Samples `settings.deck_size` distinct values without replacement.
    pub fn build_with<R: Rng + ?Sized>(
        settings: &GameSettings,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let cards = sample(rng, settings.population(), settings.deck_size)
            .into_iter()
            .map(|offset| settings.min_card + offset as Card)
            .collect();
        Ok(Self { cards })
    }

    /// Uses an explicit card order. The last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, GameError> {
        if cards.is_empty() {
            return Err(GameError::InvalidConfiguration("deck must contain at least one card"));
        }
        if cards.iter().any(|card| !is_valid_card(*card)) {
            return Err(GameError::InvalidConfiguration("deck contains a card outside 3..=35"));
        }
        let mut seen = HashSet::with_capacity(cards.len());
        if !cards.iter().all(|card| seen.insert(*card)) {
            return Err(GameError::InvalidConfiguration("deck contains duplicate cards"));
        }
        Ok(Self { cards })
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DECK_SIZE, MAX_CARD_VALUE, MIN_CARD_VALUE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn build_yields_distinct_cards_in_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::build(&mut rng).expect("standard deck");
            assert_eq!(deck.len(), DECK_SIZE);
            let mut seen = HashSet::new();
            while !deck.is_empty() {
                let card = deck.draw().expect("card");
                assert!((MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&card));
                assert!(seen.insert(card), "card {card} drawn twice");
            }
            assert_eq!(seen.len(), DECK_SIZE);
        }
    }

    #[test]
    fn draw_past_the_end_fails() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::build(&mut rng).expect("standard deck");
        for _ in 0..DECK_SIZE {
            deck.draw().expect("card");
        }
        assert!(deck.is_empty());
        assert!(matches!(deck.draw(), Err(GameError::EmptyDeck)));
    }

    #[test]
    fn same_seed_same_deck() {
        let a = Deck::build(&mut StdRng::seed_from_u64(42)).expect("deck");
        let b = Deck::build(&mut StdRng::seed_from_u64(42)).expect("deck");
        assert_eq!(a, b);
    }

    #[test]
    fn full_range_deck_uses_every_value() {
        let settings = GameSettings::with_deck_size(33).expect("settings");
        let mut deck = Deck::build_with(&settings, &mut StdRng::seed_from_u64(1)).expect("deck");
        let mut cards = Vec::new();
        while let Ok(card) = deck.draw() {
            cards.push(card);
        }
        cards.sort_unstable();
        assert_eq!(cards, (MIN_CARD_VALUE..=MAX_CARD_VALUE).collect::<Vec<_>>());
    }

    #[test]
    fn explicit_deck_is_validated() {
        assert!(Deck::from_cards(vec![3, 4, 5]).is_ok());
        assert!(matches!(
            Deck::from_cards(vec![3, 3]),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Deck::from_cards(vec![2, 10]),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Deck::from_cards(Vec::new()),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn explicit_deck_draws_from_the_end() {
        let mut deck = Deck::from_cards(vec![10, 20, 30]).expect("deck");
        assert_eq!(deck.draw().expect("card"), 30);
        assert_eq!(deck.draw().expect("card"), 20);
        assert!(deck.contains(10));
    }
}
