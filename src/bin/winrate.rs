use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use log::{debug, info};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use nothanks::{Game, Policy, create_policy_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run many No Thanks! games and report per-policy win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1000)]
    games: usize,

    /// Base RNG seed (deck, seating and policy RNGs are derived from it)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output PNG chart
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Policy specs for the three seats, e.g. heuristic heuristic random
    #[arg(num_args = 3, required = true)]
    policies: Vec<String>,
}

#[derive(Default)]
struct Tally {
    seats: usize,
    wins: usize,
    shared_wins: usize,
    total_score: i64,
}

struct Summary {
    label: String,
    win_rate: f64,
    tally: Tally,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args
        .policies
        .iter()
        .any(|s| label_for_spec(s) == "human")
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let labels: Vec<String> = args.policies.iter().map(|s| label_for_spec(s)).collect();
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    info!("simulating {} games", args.games);
    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut order: Vec<usize> = (0..args.policies.len()).collect();
        let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        order.shuffle(&mut seat_rng);

        let mut game = Game::builder()
            .with_seed(mix_seed(args.seed, game_idx as u64, 0x5EED_15))
            .build()?;

        let mut policies: Vec<Box<dyn Policy>> = Vec::with_capacity(order.len());
        let mut seat_labels: Vec<&str> = Vec::with_capacity(order.len());
        for (seat, src_idx) in order.iter().enumerate() {
            let policy_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            policies.push(create_policy_from_spec(&args.policies[*src_idx], seat, policy_seed)?);
            seat_labels.push(&labels[*src_idx]);
        }

        game.play_out(&mut policies)?;
        let scores = game.scores().ok_or("game finished without scores")?;
        let winners = game.winners().ok_or("game finished without winners")?;
        debug!("game {game_idx}: scores {scores:?}, winners {winners:?}");

        for (seat, label) in seat_labels.iter().enumerate() {
            let tally = tallies.entry(label.to_string()).or_default();
            tally.seats += 1;
            tally.total_score += scores[seat] as i64;
            if winners.contains(&seat) {
                if winners.len() > 1 {
                    tally.shared_wins += 1;
                } else {
                    tally.wins += 1;
                }
            }
        }
    }

    let mut results: Vec<Summary> = tallies
        .into_iter()
        .map(|(label, tally)| Summary {
            win_rate: if tally.seats > 0 {
                tally.wins as f64 / tally.seats as f64
            } else {
                0.0
            },
            label,
            tally,
        })
        .collect();
    results.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| a.label.cmp(&b.label))
    });

    println!("Win rates (per seat):");
    for summary in &results {
        let Tally {
            seats,
            wins,
            shared_wins,
            total_score,
        } = summary.tally;
        let avg_score = if seats > 0 {
            total_score as f64 / seats as f64
        } else {
            0.0
        };
        println!(
            "  {:<12}  {wins}/{seats}  ({:.2}%)   ties: {shared_wins}   avg score: {avg_score:>6.2}",
            summary.label,
            summary.win_rate * 100.0,
        );
    }

    if !args.no_chart {
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

fn render_bar_chart(out: &Path, data: &[Summary]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|s| s.label.clone()).collect();
    let values: Vec<f64> = data.iter().map(|s| s.win_rate * 100.0).collect();
    let max_value = values.iter().copied().fold(10.0_f64, f64::max);

    let root = BitMapBackend::new(out, (900, 560)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("No Thanks! win rates (per seat)", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len() + 1, 0.0f64..max_value)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Outright wins (%)")
        .x_desc("Policy")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(|e| format!("{e}"))?;

    chart
        .draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, value)| Rectangle::new([(i, 0.0), (i + 1, *value)], BLUE.filled())),
        )
        .map_err(|e| format!("{e}"))?;

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
