use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action::{Action, PlayerId};
use crate::card::{Card, GameSettings};
use crate::deck::Deck;
use crate::error::GameError;
use crate::player::Player;
use crate::policy::Policy;
use crate::score::winners;
use crate::state::{
    GameEvent, GameStateView, GameStatus, PlayerPublicState, Pool, TurnPhase,
};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

pub const DEFAULT_NAMES: [&str; 3] = ["Alice", "Bob", "Claire"];

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub deck_size: Option<usize>,
    /// Fixed first player; chosen uniformly at random when `None`.
    pub starting_player: Option<PlayerId>,
}

impl GameConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            deck_size: None,
            starting_player: None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Builder that enables deterministic deck injection for testing and RL experiments.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
    names: Vec<String>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
            names: DEFAULT_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Explicit card order; the last card is revealed first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the number of cards sampled into the deck (24 by default).
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.config.deck_size = Some(deck_size);
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.config.starting_player = Some(player);
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.build_with_rng(&mut rng)
    }

    /// Builds the game drawing deck order and starting seat from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Game, GameError> {
        Game::from_builder(self, rng)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Core No Thanks! turn engine.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    current_player: PlayerId,
    players: Vec<Player>,
    deck: Deck,
    pool: Pool,
    scores: Option<Vec<i32>>,
    history: Vec<GameEvent>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn pool(&self) -> Pool {
        self.pool
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayer(id))
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// Chips held by every player plus the pot. Constant for the whole game.
    pub fn total_chips(&self) -> i32 {
        self.players.iter().map(Player::chips).sum::<i32>() + self.pool.chips
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    /// Final scores, available once the game is over.
    pub fn scores(&self) -> Option<&[i32]> {
        self.scores.as_deref()
    }

    pub fn winners(&self) -> Option<&[PlayerId]> {
        match &self.status {
            GameStatus::Finished { winners } => Some(winners),
            GameStatus::Ongoing => None,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let me = self.player(perspective)?;
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name().to_string(),
                cards: player.sorted_cards(),
                is_current: idx == self.current_player,
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            phase: self.phase,
            status: self.status.clone(),
            self_player: perspective,
            current_player: self.current_player,
            deck_remaining: self.deck.len(),
            pool: self.pool,
            players,
            hand: me.sorted_cards(),
            chips: me.chips(),
        })
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        let state = self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        self.expect_phase(TurnPhase::AwaitingDecision)?;
        if state.can_pass() {
            Ok(vec![Action::Take, Action::Pass])
        } else {
            Ok(vec![Action::Take])
        }
    }

    /// Reveals the next card for the current player.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.expect_phase(TurnPhase::AwaitingDraw)?;
        let card = self.deck.draw()?;
        self.pool = Pool::revealed(card);
        self.phase = TurnPhase::AwaitingDecision;
        debug!(
            "{} reveals {card} ({} left in deck)",
            self.players[self.current_player].name(),
            self.deck.len()
        );
        self.history.push(GameEvent::Revealed {
            player: self.current_player,
            card,
        });
        Ok(card)
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        self.expect_phase(TurnPhase::AwaitingDecision)?;

        match action {
            Action::Take => {
                let (card, chips) = self.players[player].take(&mut self.pool)?;
                debug!("{} takes {card} and {chips} chips", self.players[player].name());
                self.history.push(GameEvent::Took {
                    player,
                    card,
                    chips,
                });
                if self.deck.is_empty() {
                    self.finish();
                } else {
                    self.phase = TurnPhase::AwaitingDraw;
                }
            }
            Action::Pass => {
                let card = self.players[player].pass(&mut self.pool)?;
                debug!(
                    "{} passes {card}, pot is now {}",
                    self.players[player].name(),
                    self.pool.chips
                );
                self.history.push(GameEvent::Passed { player, card });
                self.current_player = (self.current_player + 1) % self.players.len();
            }
        }

        debug_assert_eq!(self.total_chips(), self.settings.total_chips());
        Ok(())
    }

    /// Draws if needed so the current player faces a decision. Returns the
    /// resulting phase, which is `GameOver` only if the game already ended.
    pub fn advance_to_decision(&mut self) -> Result<TurnPhase, GameError> {
        if self.phase == TurnPhase::AwaitingDraw {
            self.draw()?;
        }
        Ok(self.phase)
    }

    /// Lets the current player's policy resolve one decision.
    pub fn play_turn<P: Policy>(&mut self, policies: &mut [P]) -> Result<Action, GameError> {
        if policies.len() != self.players.len() {
            return Err(GameError::InvalidConfiguration("expected one policy per player"));
        }
        if self.advance_to_decision()? == TurnPhase::GameOver {
            return Err(GameError::GameOver);
        }
        let current = self.current_player;
        let view = self.state_view(current)?;
        let legal = self.legal_actions(current)?;
        let action = policies[current].select_action(&view, &legal);
        self.apply_action(current, action)?;
        Ok(action)
    }

    /// Runs the game to completion with one policy per seat.
    pub fn play_out<P: Policy>(&mut self, policies: &mut [P]) -> Result<&GameStatus, GameError> {
        while !self.is_finished() {
            self.play_turn(policies)?;
        }
        Ok(&self.status)
    }

    fn finish(&mut self) {
        let scores: Vec<i32> = self.players.iter().map(Player::tally).collect();
        let winners = winners(&scores);
        let names: Vec<&str> = winners.iter().map(|id| self.players[*id].name()).collect();
        info!("game over, scores {scores:?}, won by {}", names.join(" and "));
        self.history.push(GameEvent::Finished {
            scores: scores.clone(),
            winners: winners.clone(),
        });
        self.scores = Some(scores);
        self.status = GameStatus::Finished { winners };
        self.phase = TurnPhase::GameOver;
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn from_builder<R: Rng + ?Sized>(builder: GameBuilder, rng: &mut R) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            deck,
            names,
        } = builder;
        let mut settings = match config.deck_size {
            Some(size) => GameSettings::with_deck_size(size)?,
            None => GameSettings::standard(),
        };
        if names.len() != settings.num_players {
            return Err(GameError::InvalidConfiguration("exactly three player names are required"));
        }

        let deck = match deck {
            Some(cards) => {
                let deck = Deck::from_cards(cards)?;
                settings.deck_size = deck.len();
                deck
            }
            None => Deck::build_with(&settings, rng)?,
        };

        let current_player = match config.starting_player {
            Some(player) if player < settings.num_players => player,
            Some(player) => return Err(GameError::InvalidPlayer(player)),
            None => rng.gen_range(0..settings.num_players),
        };

        let players = names
            .into_iter()
            .map(|name| Player::with_chips(name, settings.starting_chips))
            .collect();

        debug!("new game, {} cards, player {current_player} starts", deck.len());
        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingDraw,
            current_player,
            players,
            deck,
            pool: Pool::empty(),
            scores: None,
            history: Vec::new(),
        })
    }
}
