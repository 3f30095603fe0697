//! Scoring utilities for No Thanks!.
//!
//! Only the lowest card of each unbroken run counts:
//!   score = sum(lowest card of every run) - chips
//! Lower is better; every player sharing the minimum wins.

use std::collections::BTreeSet;

use crate::action::PlayerId;
use crate::card::Card;

/// Keeps the minimum of every maximal run of consecutive values.
pub fn collapse_runs<'a, I>(cards: I) -> BTreeSet<Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let all: BTreeSet<Card> = cards.into_iter().copied().collect();
    all.iter()
        .copied()
        .filter(|card| *card == 0 || !all.contains(&(card - 1)))
        .collect()
}

/// Points contributed by the cards alone, after run collapse.
pub fn card_points<'a, I>(cards: I) -> i32
where
    I: IntoIterator<Item = &'a Card>,
{
    collapse_runs(cards).iter().map(|card| *card as i32).sum()
}

pub fn score(cards: &[Card], chips: i32) -> i32 {
    card_points(cards) - chips
}

/// Every player whose score equals the minimum.
pub fn winners(scores: &[i32]) -> Vec<PlayerId> {
    let Some(best) = scores.iter().min().copied() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == best)
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    #[test]
    fn collapses_runs_to_their_minimum() {
        assert_eq!(collapse_runs(&[5, 6, 7, 10]), BTreeSet::from([5, 10]));
        assert_eq!(collapse_runs(&[3, 4, 5]), BTreeSet::from([3]));
        assert_eq!(collapse_runs(&[]), BTreeSet::new());
        assert_eq!(
            collapse_runs(&[35, 20, 33, 21, 34]),
            BTreeSet::from([20, 33])
        );
    }

    #[test]
    fn collapse_is_idempotent() {
        let once = collapse_runs(&[8, 9, 11, 12, 13, 30]);
        let twice = collapse_runs(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn collapse_ignores_input_order() {
        let mut cards: Vec<Card> = vec![3, 4, 9, 10, 11, 17, 25, 26, 35];
        let expected = collapse_runs(&cards);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            cards.shuffle(&mut rng);
            assert_eq!(collapse_runs(&cards), expected);
        }
    }

    #[test]
    fn score_subtracts_chips() {
        assert_eq!(score(&[3, 4, 10], 5), 8);
        assert_eq!(score(&[], 11), -11);
    }

    #[test]
    fn ties_report_every_winner() {
        assert_eq!(winners(&[10, 4, 7]), vec![1]);
        assert_eq!(winners(&[4, 9, 4]), vec![0, 2]);
        assert!(winners(&[]).is_empty());
    }
}
