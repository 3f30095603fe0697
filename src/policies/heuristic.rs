use crate::action::Action;
use crate::card::Card;
use crate::policy::Policy;
use crate::score::card_points;
use crate::state::{GameStateView, Pool};

/// Tunable constants of the expected-value heuristic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicWeights {
    /// Linear growth of a chip's worth with the size of the stash.
    pub chip_slope: f64,
    pub chip_intercept: f64,
    /// Fraction of the chip term kept on the take side.
    pub take_discount: f64,
}

impl HeuristicWeights {
    /// Worth of a single chip when holding `chips` of them.
    pub fn chip_weight(&self, chips: i32) -> f64 {
        self.chip_slope * chips as f64 + self.chip_intercept
    }
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            chip_slope: 0.2,
            chip_intercept: 0.8,
            take_discount: 0.5,
        }
    }
}

/// Estimated value of both outcomes. Lower is better.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub take: f64,
    pub pass: f64,
}

impl Evaluation {
    /// Ties favour taking.
    pub fn preferred(&self) -> Action {
        if self.take <= self.pass {
            Action::Take
        } else {
            Action::Pass
        }
    }
}

/// Scores the hypothetical hands after taking and after passing.
///
/// Take: the revealed card joins the hand (runs collapse) and the pot joins the
/// stash, whose chip term is discounted. Pass: the hand is unchanged and one
/// chip is paid.
pub fn evaluate(
    weights: &HeuristicWeights,
    hand: &[Card],
    chips: i32,
    card: Card,
    pot: i32,
) -> Evaluation {
    let take_chips = chips + pot;
    let take_cards = hand.iter().chain(std::iter::once(&card));
    let take = card_points(take_cards) as f64
        - weights.chip_weight(take_chips) * weights.take_discount * take_chips as f64;

    let pass_chips = chips - 1;
    let pass = card_points(hand) as f64 - weights.chip_weight(pass_chips) * pass_chips as f64;

    Evaluation { take, pass }
}

/// Decision rule of the built-in players. Broke players always take.
pub fn decide(weights: &HeuristicWeights, hand: &[Card], chips: i32, pool: &Pool) -> Action {
    if chips <= 0 {
        return Action::Take;
    }
    let Some(card) = pool.card else {
        return Action::Take;
    };
    evaluate(weights, hand, chips, card, pool.chips).preferred()
}

/// Weighted expected-value policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPolicy {
    weights: HeuristicWeights,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Policy for HeuristicPolicy {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "heuristic policy requires at least one legal action"
        );
        let action = decide(&self.weights, &state.hand, state.chips, &state.pool);
        if legal_actions.contains(&action) {
            action
        } else {
            legal_actions[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_weight_endpoints() {
        let weights = HeuristicWeights::default();
        assert!((weights.chip_weight(1) - 1.0).abs() < 1e-9);
        assert!((weights.chip_weight(11) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn evaluate_matches_hand_computation() {
        let weights = HeuristicWeights::default();
        let eval = evaluate(&weights, &[20], 5, 21, 2);
        // take: {20,21} -> 20, chips 7 -> 20 - (2.2 / 2) * 7
        assert!((eval.take - 12.3).abs() < 1e-9);
        // pass: 20 - 1.6 * 4
        assert!((eval.pass - 13.6).abs() < 1e-9);
        assert_eq!(eval.preferred(), Action::Take);
    }

    #[test]
    fn forced_take_without_chips() {
        let weights = HeuristicWeights::default();
        assert_eq!(decide(&weights, &[], 0, &Pool::with_chips(20, 0)), Action::Take);
        assert_eq!(decide(&weights, &[], -1, &Pool::with_chips(35, 0)), Action::Take);
    }

    #[test]
    fn passes_expensive_card_with_full_stash() {
        let weights = HeuristicWeights::default();
        assert_eq!(decide(&weights, &[], 11, &Pool::revealed(35)), Action::Pass);
    }
}
