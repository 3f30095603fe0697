//! Step-wise environment for an external training loop.
//!
//! One seat (the learner) is driven through [`NoThanksEnv::step`]; the other
//! two seats are played by their own policies between learner decisions.
//!
//! Reward is the learner's score before the step minus its score after it, so
//! paying a chip yields -1 and taking a card yields the pot minus the points the
//! card adds after run collapse. Summed over an episode it equals
//! `-(final score) - 11`.

use log::trace;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayerId};
use crate::card::{Card, GameSettings, NUM_PLAYERS};
use crate::error::GameError;
use crate::game::{Game, GameBuilder};
use crate::ml::encoding::adjacent_cards;
use crate::ml::{OBSERVATION_FEATURES, ObservationEncoder};
use crate::policies::HeuristicPolicy;
use crate::policy::Policy;

const DEFAULT_SEED: u64 = 0xC0FF_EE00_5EED_0001;

pub type Observation = [f32; OBSERVATION_FEATURES];

#[derive(Clone, Copy, Debug)]
pub struct EnvConfig {
    pub seed: u64,
    pub learner: PlayerId,
    /// Fixed first player for every episode; random when `None`.
    pub starting_player: Option<PlayerId>,
    pub deck_size: Option<usize>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            learner: 0,
            starting_player: None,
            deck_size: None,
        }
    }
}

/// Auxiliary data returned with every step.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepInfo {
    /// Learner's cards that the revealed card would join in a run. The
    /// revealed card itself is never listed; test `!valued_cards.is_empty()`
    /// to ask whether taking it extends a run.
    pub valued_cards: Vec<Card>,
    /// Revealed card, or -1 when none is pending.
    pub card_pool: i32,
    /// Chips on the revealed card, or -1 when none is pending.
    pub chip_pool: i32,
}

#[derive(Clone, Debug)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

pub struct NoThanksEnv {
    config: EnvConfig,
    /// Indexed by seat; the learner's seat is `None`.
    seats: Vec<Option<Box<dyn Policy>>>,
    rng: StdRng,
    game: Option<Game>,
    episodes: u64,
}

impl NoThanksEnv {
    /// Opponents default to the built-in heuristic. Seats and deck size are
    /// checked here, not on the first `reset`.
    pub fn new(config: EnvConfig) -> Result<Self, GameError> {
        if config.learner >= NUM_PLAYERS {
            return Err(GameError::InvalidPlayer(config.learner));
        }
        if let Some(seat) = config.starting_player.filter(|seat| *seat >= NUM_PLAYERS) {
            return Err(GameError::InvalidPlayer(seat));
        }
        if let Some(size) = config.deck_size {
            GameSettings::with_deck_size(size)?;
        }
        let seats = (0..NUM_PLAYERS)
            .map(|seat| {
                (seat != config.learner)
                    .then(|| Box::new(HeuristicPolicy::new()) as Box<dyn Policy>)
            })
            .collect();
        Ok(Self {
            config,
            seats,
            rng: StdRng::seed_from_u64(config.seed),
            game: None,
            episodes: 0,
        })
    }

    /// Replaces the policy playing `seat`. The learner's seat cannot be replaced.
    pub fn with_opponent(
        mut self,
        seat: PlayerId,
        policy: Box<dyn Policy>,
    ) -> Result<Self, GameError> {
        if seat >= NUM_PLAYERS {
            return Err(GameError::InvalidPlayer(seat));
        }
        if seat == self.config.learner {
            return Err(GameError::InvalidConfiguration("the learner's seat has no opponent policy"));
        }
        self.seats[seat] = Some(policy);
        Ok(self)
    }

    pub fn learner(&self) -> PlayerId {
        self.config.learner
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.game.as_ref().is_none_or(Game::is_finished)
    }

    /// Starts a new game and plays the other seats up to the learner's first
    /// decision. If the game ends before the learner ever decides,
    /// [`is_done`](Self::is_done) is already true.
    pub fn reset(&mut self) -> Result<Observation, GameError> {
        let mut builder = GameBuilder::new();
        if let Some(seat) = self.config.starting_player {
            builder = builder.with_starting_player(seat);
        }
        if let Some(size) = self.config.deck_size {
            builder = builder.with_deck_size(size);
        }
        let mut game = builder.build_with_rng(&mut self.rng)?;
        play_opponents(&mut game, &mut self.seats, self.config.learner)?;
        self.episodes += 1;
        trace!("episode {} reset, learner faces {:?}", self.episodes, game.pool());
        let observation = observe(&game, self.config.learner)?;
        self.game = Some(game);
        Ok(observation)
    }

    /// Applies an action index (take = 0, pass = 1) for the learner.
    pub fn step(&mut self, action: usize) -> Result<Step, GameError> {
        let action = Action::from_index(action)?;
        self.step_action(action)
    }

    pub fn step_action(&mut self, action: Action) -> Result<Step, GameError> {
        let learner = self.config.learner;
        let game = self.game.as_mut().ok_or(GameError::GameOver)?;
        let before = game.player(learner)?.tally();
        game.apply_action(learner, action)?;
        play_opponents(game, &mut self.seats, learner)?;
        let after = game.player(learner)?.tally();
        let step = Step {
            observation: observe(game, learner)?,
            reward: (before - after) as f32,
            done: game.is_finished(),
            info: info(game, learner)?,
        };
        trace!("learner {action:?}: reward {} done {}", step.reward, step.done);
        Ok(step)
    }

    /// Info for the current decision point, as returned by `step`.
    pub fn info(&self) -> Result<StepInfo, GameError> {
        let game = self.game.as_ref().ok_or(GameError::GameOver)?;
        info(game, self.config.learner)
    }
}

/// Advances until the learner faces a card or the game ends.
fn play_opponents(
    game: &mut Game,
    seats: &mut [Option<Box<dyn Policy>>],
    learner: PlayerId,
) -> Result<(), GameError> {
    loop {
        if game.is_finished() {
            return Ok(());
        }
        game.advance_to_decision()?;
        let current = game.current_player();
        if current == learner {
            return Ok(());
        }
        let policy = seats[current]
            .as_mut()
            .ok_or(GameError::InvalidConfiguration("opponent seat has no policy"))?;
        let view = game.state_view(current)?;
        let legal = game.legal_actions(current)?;
        let action = policy.select_action(&view, &legal);
        game.apply_action(current, action)?;
    }
}

fn observe(game: &Game, learner: PlayerId) -> Result<Observation, GameError> {
    Ok(ObservationEncoder::encode(&game.state_view(learner)?))
}

fn info(game: &Game, learner: PlayerId) -> Result<StepInfo, GameError> {
    let pool = game.pool();
    let Some(card) = pool.card else {
        return Ok(StepInfo {
            valued_cards: Vec::new(),
            card_pool: -1,
            chip_pool: -1,
        });
    };
    let hand = game.player(learner)?.sorted_cards();
    Ok(StepInfo {
        valued_cards: adjacent_cards(&hand, card),
        card_pool: i32::from(card),
        chip_pool: pool.chips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_before_reset_fails() {
        let mut env = NoThanksEnv::new(EnvConfig::default()).expect("env");
        assert!(env.is_done());
        assert!(matches!(env.step(0), Err(GameError::GameOver)));
    }

    #[test]
    fn learner_seat_is_validated() {
        let config = EnvConfig {
            learner: 3,
            ..EnvConfig::default()
        };
        assert!(matches!(
            NoThanksEnv::new(config),
            Err(GameError::InvalidPlayer(3))
        ));
        let env = NoThanksEnv::new(EnvConfig::default()).expect("env");
        assert!(
            env.with_opponent(0, Box::new(HeuristicPolicy::new()))
                .is_err()
        );
    }

    #[test]
    fn bad_config_fails_at_construction() {
        let config = EnvConfig {
            starting_player: Some(7),
            ..EnvConfig::default()
        };
        assert!(matches!(
            NoThanksEnv::new(config),
            Err(GameError::InvalidPlayer(7))
        ));
        for size in [0, 34, 99] {
            let config = EnvConfig {
                deck_size: Some(size),
                ..EnvConfig::default()
            };
            assert!(matches!(
                NoThanksEnv::new(config),
                Err(GameError::InvalidConfiguration(_))
            ));
        }
        let config = EnvConfig {
            starting_player: Some(2),
            deck_size: Some(33),
            ..EnvConfig::default()
        };
        assert!(NoThanksEnv::new(config).is_ok());
    }

    #[test]
    fn valued_cards_flag_run_extensions() -> Result<(), GameError> {
        // Learner takes 20, then faces 21 (adjacent) and later 30 (not).
        let mut game = GameBuilder::new()
            .with_deck(vec![30, 21, 20])
            .with_starting_player(0)
            .build()?;
        game.draw()?;
        game.apply_action(0, Action::Take)?;
        game.draw()?;
        let facing_21 = info(&game, 0)?;
        assert_eq!(facing_21.card_pool, 21);
        assert_eq!(facing_21.valued_cards, vec![20]);
        assert!(!facing_21.valued_cards.contains(&21));

        game.apply_action(0, Action::Take)?;
        game.draw()?;
        let facing_30 = info(&game, 0)?;
        assert_eq!(facing_30.card_pool, 30);
        assert!(facing_30.valued_cards.is_empty());
        Ok(())
    }
}
