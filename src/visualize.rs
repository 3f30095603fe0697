use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::score::{collapse_runs, score};
use crate::state::{GameEvent, GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Bracket runs so the counted card is obvious, e.g. `[20 21 22]`.
    pub group_runs: bool,
    /// List only the viewing player's cards.
    pub show_opponents: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            group_runs: true,
            show_opponents: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match &state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winners } if winners.len() > 1 => {
            format!("Finished (tie: {})", player_list(state, winners))
        }
        GameStatus::Finished { winners } => {
            format!("Finished (winner: {})", player_list(state, winners))
        }
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(out, "Phase: {:?}", state.phase);
    let _ = writeln!(
        out,
        "Current player: {}{}",
        player_name(state, state.current_player),
        if state.is_my_turn() { " (You)" } else { "" }
    );
    let pool = match state.pool.card {
        Some(card) => format!("{card} with {} chips", state.pool.chips),
        None => String::from("--"),
    };
    let _ = writeln!(out, "Deck: {}  |  Pool: {pool}", state.deck_remaining);
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let is_self = player.id == state.self_player;
        if !is_self && !options.show_opponents {
            continue;
        }
        let label_you = if is_self { " (You)" } else { "" };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "  {}{} - cards {}{}",
            player.name,
            label_you,
            format_cards(&player.cards, options.group_runs),
            current_tag
        );
    }
    let _ = writeln!(
        out,
        "Your chips: {}  |  Your score: {}",
        state.chips,
        score(&state.hand, state.chips)
    );
    out
}

pub fn describe_action(state: &GameStateView, action: Action) -> String {
    let Some(card) = state.pool.card else {
        return format!("{action:?}");
    };
    match action {
        Action::Take => {
            let mut after = state.hand.clone();
            after.push(card);
            format!(
                "Take {card} and {} chips (score {} -> {})",
                state.pool.chips,
                score(&state.hand, state.chips),
                score(&after, state.chips + state.pool.chips)
            )
        }
        Action::Pass => format!(
            "Pass on {card} (chips {} -> {})",
            state.chips,
            state.chips - 1
        ),
    }
}

pub fn describe_event(names: &[String], event: &GameEvent) -> String {
    let name = |id: usize| {
        names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Player {id}"))
    };
    match event {
        GameEvent::Revealed { player, card } => format!("{} draws the number {card}.", name(*player)),
        GameEvent::Took {
            player,
            card,
            chips,
        } => format!("{} takes the {card} and {chips} chips.", name(*player)),
        GameEvent::Passed { player, card } => {
            format!("{} passes the {card} and loses a chip.", name(*player))
        }
        GameEvent::Finished { scores, winners } => {
            let mut out = String::new();
            for (id, score) in scores.iter().enumerate() {
                let _ = writeln!(out, "{} has a final score of {score}", name(id));
            }
            let winner_names: Vec<String> = winners.iter().map(|id| name(*id)).collect();
            if winner_names.len() > 1 {
                let _ = write!(out, "{} tie for the win!", winner_names.join(" and "));
            } else {
                let _ = write!(out, "{} has won!", winner_names.join(""));
            }
            out
        }
    }
}

/// Sorted cards, with runs bracketed when `group_runs` is set.
pub fn format_cards(cards: &[Card], group_runs: bool) -> String {
    if cards.is_empty() {
        return String::from("(none)");
    }
    let mut sorted = cards.to_vec();
    sorted.sort_unstable();
    if !group_runs {
        return sorted
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ");
    }
    let heads = collapse_runs(&sorted);
    let mut parts: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();
    for card in &sorted {
        if heads.contains(card) && !run.is_empty() {
            parts.push(join_run(&run));
            run.clear();
        }
        run.push(card.to_string());
    }
    parts.push(join_run(&run));
    parts.join(" ")
}

fn join_run(run: &[String]) -> String {
    if run.len() == 1 {
        run[0].clone()
    } else {
        format!("[{}]", run.join(" "))
    }
}

fn player_name(state: &GameStateView, id: usize) -> String {
    state
        .players
        .iter()
        .find(|player| player.id == id)
        .map(|player| player.name.clone())
        .unwrap_or_else(|| format!("Player {id}"))
}

fn player_list(state: &GameStateView, ids: &[usize]) -> String {
    ids.iter()
        .map(|id| player_name(state, *id))
        .collect::<Vec<_>>()
        .join(", ")
}
