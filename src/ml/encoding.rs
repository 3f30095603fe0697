use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::card::{CARD_RANGE, Card, TOTAL_CHIPS, card_index, is_valid_card};
use crate::state::GameStateView;

pub const HAND_FEATURES: usize = CARD_RANGE;
pub const REVEALED_FEATURES: usize = CARD_RANGE;
pub const OPPONENT_FEATURES: usize = 2 * CARD_RANGE;
/// Own chips, pot, deck size, whose turn, and whether the revealed card extends a run.
pub const SCALAR_FEATURES: usize = 5;
pub const OBSERVATION_FEATURES: usize =
    HAND_FEATURES + REVEALED_FEATURES + OPPONENT_FEATURES + SCALAR_FEATURES;

#[inline]
fn normalize(value: i32, max: i32) -> f32 {
    if max == 0 {
        0.0
    } else {
        value as f32 / max as f32
    }
}

fn mark_cards(out: &mut [f32], cards: &[Card]) {
    for card in cards.iter().copied().filter(|card| is_valid_card(*card)) {
        out[card_index(card)] = 1.0;
    }
}

/// Cards in `hand` adjacent to `card`, i.e. ones it would join in a run.
pub fn adjacent_cards(hand: &[Card], card: Card) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|held| held.abs_diff(card) == 1)
        .collect()
}

/// Fixed-length encoding of a player's view, seat-relative so the same
/// network can sit in any chair.
pub struct ObservationEncoder;

impl ObservationEncoder {
    pub fn encode(state: &GameStateView) -> [f32; OBSERVATION_FEATURES] {
        let mut out = [0.0; OBSERVATION_FEATURES];
        let mut offset = 0;

        mark_cards(&mut out[offset..offset + HAND_FEATURES], &state.hand);
        offset += HAND_FEATURES;

        if let Some(card) = state.pool.card.filter(|card| is_valid_card(*card)) {
            out[offset + card_index(card)] = 1.0;
        }
        offset += REVEALED_FEATURES;

        let seats = state.players.len().max(1);
        for step in 1..=2 {
            let seat = (state.self_player + step) % seats;
            if let Some(player) = state.opponents().find(|player| player.id == seat) {
                mark_cards(&mut out[offset..offset + CARD_RANGE], &player.cards);
            }
            offset += CARD_RANGE;
        }

        out[offset] = normalize(state.chips, TOTAL_CHIPS);
        offset += 1;
        out[offset] = normalize(state.pool.chips, TOTAL_CHIPS);
        offset += 1;
        out[offset] = normalize(
            state.deck_remaining as i32,
            state.settings.deck_size as i32,
        );
        offset += 1;
        out[offset] = if state.is_my_turn() { 1.0 } else { 0.0 };
        offset += 1;
        out[offset] = match state.pool.card {
            Some(card) if !adjacent_cards(&state.hand, card).is_empty() => 1.0,
            _ => 0.0,
        };
        offset += 1;

        debug_assert_eq!(offset, OBSERVATION_FEATURES);
        out
    }

    pub fn encode_tensor<B>(state: &GameStateView) -> Tensor<B, 2>
    where
        B: Backend,
        B::Device: Default,
    {
        let features = Self::encode(state);
        let data = TensorData::from([features]);
        Tensor::<B, 2>::from_data(data, &B::Device::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::game::Game;

    #[test]
    fn encodes_hand_pool_and_scalars() {
        let mut game = Game::builder()
            .with_deck(vec![10, 21, 20])
            .with_starting_player(0)
            .build()
            .expect("game");
        game.draw().expect("draw");
        game.apply_action(0, Action::Take).expect("take");
        game.draw().expect("draw");
        let view = game.state_view(0).expect("view");
        let encoded = ObservationEncoder::encode(&view);

        assert_eq!(encoded[card_index(20)], 1.0);
        assert_eq!(encoded[HAND_FEATURES + card_index(21)], 1.0);
        assert_eq!(encoded.iter().take(HAND_FEATURES).sum::<f32>(), 1.0);
        let scalars = &encoded[OBSERVATION_FEATURES - SCALAR_FEATURES..];
        assert!((scalars[0] - 11.0 / 33.0).abs() < 1e-6);
        assert_eq!(scalars[1], 0.0);
        assert_eq!(scalars[3], 1.0);
        assert_eq!(scalars[4], 1.0);
    }

    #[test]
    fn opponents_are_seat_relative() {
        let mut game = Game::builder()
            .with_deck(vec![10, 30])
            .with_starting_player(1)
            .build()
            .expect("game");
        game.draw().expect("draw");
        game.apply_action(1, Action::Take).expect("take");
        let first_opponent = HAND_FEATURES + REVEALED_FEATURES;

        let view = game.state_view(0).expect("view");
        let encoded = ObservationEncoder::encode(&view);
        assert_eq!(encoded[first_opponent + card_index(30)], 1.0);

        let view = game.state_view(2).expect("view");
        let encoded = ObservationEncoder::encode(&view);
        assert_eq!(encoded[first_opponent + CARD_RANGE + card_index(30)], 1.0);
    }

    #[test]
    fn full_deck_stays_in_unit_range() {
        let mut game = Game::builder()
            .with_seed(4)
            .with_deck_size(33)
            .build()
            .expect("game");
        game.draw().expect("draw");
        let view = game.state_view(game.current_player()).expect("view");
        let encoded = ObservationEncoder::encode(&view);
        assert!(encoded.iter().all(|value| (0.0..=1.0).contains(value)));
        let deck_feature = encoded[OBSERVATION_FEATURES - SCALAR_FEATURES + 2];
        assert!((deck_feature - 32.0 / 33.0).abs() < 1e-6);
    }

    #[test]
    fn adjacent_cards_ignore_gaps() {
        assert_eq!(adjacent_cards(&[5, 7, 12], 6), vec![5, 7]);
        assert!(adjacent_cards(&[5, 12], 8).is_empty());
    }
}
