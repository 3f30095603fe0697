use std::io::{self, Write};

use crate::action::Action;
use crate::policy::Policy;
use crate::state::GameStateView;
use crate::visualize::{describe_action, render_state};

/// Interactive policy that queries a human via standard input.
pub struct HumanPolicy {
    name: String,
}

impl HumanPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanPolicy {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Policy for HumanPolicy {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "at least one legal action must exist"
        );
        loop {
            println!(
                "\n=== {}'s turn (player {}) ===",
                self.name, state.self_player
            );
            println!("{}", render_state(state));
            println!("Available actions:");
            for (index, action) in legal_actions.iter().enumerate() {
                println!("  [{index}] {}", describe_action(state, *action));
            }
            println!("Type the action index, 't' to take, 'p' to pass, or 'q' to quit.");
            print!("Selection: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("failed to read input");
                continue;
            }
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            let choice = if trimmed.eq_ignore_ascii_case("t") {
                Some(Action::Take)
            } else if trimmed.eq_ignore_ascii_case("p") {
                Some(Action::Pass)
            } else {
                trimmed
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| legal_actions.get(index).copied())
            };
            match choice {
                Some(action) if legal_actions.contains(&action) => {
                    println!("You selected: {}", describe_action(state, action));
                    return action;
                }
                Some(_) => println!("You have no chips left and must take the card."),
                None => println!("Invalid input: '{trimmed}'. Please choose a listed action."),
            }
        }
    }
}
