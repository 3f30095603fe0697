use std::env;
use std::error::Error;
use std::process;

use log::info;

use nothanks::{
    Game, Policy, VisualOptions, create_policy_from_spec, describe_action, describe_event,
    render_state_with_options,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut options = VisualOptions::default();
    let mut seed = DEFAULT_SEED;
    let mut starting_player: Option<usize> = None;
    let mut policy_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "--hide-opponents" => options.show_opponents = false,
            "--flat" => options.group_runs = false,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--first" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--first requires a value".to_string())?;
                starting_player = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid first player: {value}"))?,
                );
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => policy_specs.push(other.to_string()),
        }
    }

    if policy_specs.is_empty() {
        policy_specs = vec![
            String::from("human"),
            String::from("heuristic"),
            String::from("heuristic"),
        ];
    }
    if policy_specs.len() != 3 {
        return Err(format!("expected exactly 3 players, received {}", policy_specs.len()).into());
    }

    let mut builder = Game::builder().with_seed(seed);
    if let Some(player) = starting_player {
        builder = builder.with_starting_player(player);
    }
    let mut game = builder.build()?;
    let names: Vec<String> = game.players().iter().map(|p| p.name().to_string()).collect();

    let mut policies: Vec<Box<dyn Policy>> = Vec::with_capacity(policy_specs.len());
    for (index, spec) in policy_specs.iter().enumerate() {
        policies.push(create_policy_from_spec(spec, index, seed)?);
    }

    info!("starting No Thanks! with {}", policy_specs.join(", "));
    let mut printed = 0;
    while !game.is_finished() {
        game.advance_to_decision()?;
        let current = game.current_player();
        let view = game.state_view(current)?;
        if visualize {
            println!("{}", render_state_with_options(&view, options));
        }
        let legal = game.legal_actions(current)?;
        let action = policies[current].select_action(&view, &legal);
        if visualize {
            println!("Chosen action: {}\n", describe_action(&view, action));
        }
        game.apply_action(current, action)?;
        for event in &game.history()[printed..] {
            println!("{}", describe_event(&names, event));
        }
        printed = game.history().len();
    }

    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [POLICY POLICY POLICY]");
    println!("  --visualize           Show the game state and chosen actions each turn");
    println!("  --hide-opponents      Only list the acting player's cards when visualizing");
    println!("  --flat                Do not bracket runs when visualizing");
    println!("  --seed <u64>          Seed for shuffling (default: {DEFAULT_SEED:#x})");
    println!("  --first <0-2>         Fixed starting player (random when omitted)");
    println!("  --help                Show this help message");
    println!("Policy entries (exactly 3):");
    println!("  human[:name]          Interactive human-controlled player");
    println!("  random[:seed]         Random policy with optional per-seat seed");
    println!("  heuristic             Weighted expected-value heuristic");
    println!("If no policies are provided, one human plays two heuristic players.");
}
