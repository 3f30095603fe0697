use rand::SeedableRng;
use rand::rngs::StdRng;

use nothanks::{
    Action, EnvConfig, GameError, InvalidAction, NoThanksEnv, OBSERVATION_FEATURES, RandomPolicy,
    TurnPhase,
};

fn env_with_seed(seed: u64) -> NoThanksEnv {
    NoThanksEnv::new(EnvConfig {
        seed,
        starting_player: Some(0),
        ..EnvConfig::default()
    })
    .expect("env")
}

#[test]
fn reset_stops_at_learner_decision() -> Result<(), GameError> {
    let mut env = env_with_seed(3);
    let observation = env.reset()?;
    assert_eq!(observation.len(), OBSERVATION_FEATURES);
    let game = env.game().expect("game after reset");
    assert_eq!(game.current_player(), env.learner());
    assert_eq!(game.phase(), TurnPhase::AwaitingDecision);
    let info = env.info()?;
    assert!(info.card_pool >= 3);
    assert_eq!(info.chip_pool, 0);
    Ok(())
}

#[test]
fn rewards_sum_to_final_score() -> Result<(), GameError> {
    for seed in 0..20 {
        let mut env = env_with_seed(seed);
        env.reset()?;
        let mut total = 0.0f32;
        let mut steps = 0;
        while !env.is_done() {
            let info = env.info()?;
            let action = if !info.valued_cards.is_empty() || info.card_pool <= info.chip_pool {
                0
            } else {
                1
            };
            let step = match env.step(action) {
                Err(GameError::InvalidAction(InvalidAction::NoChipsToPass { .. })) => env.step(0)?,
                other => other?,
            };
            assert_eq!(step.observation.len(), OBSERVATION_FEATURES);
            total += step.reward;
            steps += 1;
            if step.done {
                assert_eq!(step.info.card_pool, -1);
                assert_eq!(step.info.chip_pool, -1);
                assert!(step.info.valued_cards.is_empty());
            }
        }
        assert!(steps > 0);
        let game = env.game().expect("finished game");
        let final_score = game.scores().expect("scores")[env.learner()];
        assert_eq!(total, (-final_score - 11) as f32);
    }
    Ok(())
}

#[test]
fn pass_costs_one_chip_of_reward() -> Result<(), GameError> {
    let mut env = env_with_seed(8);
    env.reset()?;
    let step = env.step(1)?;
    if !step.done {
        assert_eq!(step.reward, -1.0);
    }
    Ok(())
}

#[test]
fn illegal_actions_are_reported() -> Result<(), GameError> {
    let mut env = env_with_seed(21);
    env.reset()?;
    assert!(matches!(
        env.step(2),
        Err(GameError::InvalidAction(InvalidAction::UnknownAction(2)))
    ));

    let err = loop {
        match env.step_action(Action::Pass) {
            Ok(step) if step.done => panic!("game ended before the learner ran out of chips"),
            Ok(_) => continue,
            Err(err) => break err,
        }
    };
    assert!(matches!(
        err,
        GameError::InvalidAction(InvalidAction::NoChipsToPass { chips: 0 })
    ));
    let game = env.game().expect("game");
    assert_eq!(game.player(env.learner())?.chips(), 0);
    Ok(())
}

#[test]
fn finished_episode_rejects_steps() -> Result<(), GameError> {
    let mut env = env_with_seed(4);
    env.reset()?;
    while !env.is_done() {
        env.step(0)?;
    }
    assert!(matches!(env.step(0), Err(GameError::GameOver)));
    env.reset()?;
    assert_eq!(env.episodes(), 2);
    Ok(())
}

#[test]
fn same_seed_same_episode() -> Result<(), GameError> {
    let mut first = env_with_seed(77);
    let mut second = env_with_seed(77);
    assert_eq!(first.reset()?, second.reset()?);
    while !first.is_done() {
        let a = first.step(0)?;
        let b = second.step(0)?;
        assert_eq!(a.observation, b.observation);
        assert_eq!(a.reward, b.reward);
        assert_eq!(a.info, b.info);
    }
    assert!(second.is_done());
    Ok(())
}

#[test]
fn opponents_can_be_replaced() -> Result<(), GameError> {
    let mut env = env_with_seed(13)
        .with_opponent(1, Box::new(RandomPolicy::new(StdRng::seed_from_u64(1))))?
        .with_opponent(2, Box::new(RandomPolicy::new(StdRng::seed_from_u64(2))))?;
    env.reset()?;
    while !env.is_done() {
        env.step(0)?;
    }
    let game = env.game().expect("game");
    assert!(game.is_finished());
    Ok(())
}

#[test]
fn full_deck_observations_stay_normalized() -> Result<(), GameError> {
    let mut env = NoThanksEnv::new(EnvConfig {
        seed: 12,
        deck_size: Some(33),
        ..EnvConfig::default()
    })?;
    let mut observation = env.reset()?;
    while !env.is_done() {
        assert!(observation.iter().all(|value| (0.0..=1.0).contains(value)));
        let action = if env.info()?.valued_cards.is_empty() { 1 } else { 0 };
        let chips = env.game().map_or(0, |game| game.players()[0].chips());
        let action = if chips == 0 { 0 } else { action };
        observation = env.step(action)?.observation;
    }
    assert!(observation.iter().all(|value| (0.0..=1.0).contains(value)));
    Ok(())
}
