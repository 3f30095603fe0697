use crate::card::{Card, STARTING_CHIPS};
use crate::error::{GameError, InvalidAction};
use crate::score::score;
use crate::state::Pool;

/// A seat at the table: owned cards plus a chip balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    cards: Vec<Card>,
    chips: i32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_chips(name, STARTING_CHIPS)
    }

    pub fn with_chips(name: impl Into<String>, chips: i32) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            chips,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn sorted_cards(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort_unstable();
        cards
    }

    pub fn chips(&self) -> i32 {
        self.chips
    }

    pub fn can_pass(&self) -> bool {
        self.chips > 0
    }

    /// Moves the revealed card and the whole pot to this player.
    pub fn take(&mut self, pool: &mut Pool) -> Result<(Card, i32), GameError> {
        let card = pool.card.take().ok_or(InvalidAction::NoCardRevealed)?;
        let chips = std::mem::take(&mut pool.chips);
        self.cards.push(card);
        self.chips += chips;
        Ok((card, chips))
    }

    /// Pays one chip onto the revealed card.
    pub fn pass(&mut self, pool: &mut Pool) -> Result<Card, GameError> {
        let card = pool.card.ok_or(InvalidAction::NoCardRevealed)?;
        if !self.can_pass() {
            return Err(InvalidAction::NoChipsToPass { chips: self.chips }.into());
        }
        self.chips -= 1;
        pool.chips += 1;
        Ok(card)
    }

    pub fn tally(&self) -> i32 {
        score(&self.cards, self.chips)
    }
}
