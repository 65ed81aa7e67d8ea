//! Console output helpers for the CLI

use crate::{
    nim::{Piles, Player},
    pipeline::TrainingResult,
    q_learning::QLearningAgent,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print one line per pile
pub fn print_piles(piles: &Piles) {
    println!();
    println!("Piles:");
    for (i, pile) in piles.as_slice().iter().enumerate() {
        println!("Pile {i}: {pile}");
    }
    println!();
}

/// Print self-play statistics
pub fn print_training_result(result: &TrainingResult) {
    print_subsection("Training Results");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv(
        "Player 0 wins",
        &format!(
            "{} ({:.1}%)",
            format_number(result.first_player_wins),
            result.first_player_win_rate() * 100.0
        ),
    );
    print_kv("Player 1 wins", &format_number(result.second_player_wins));
    print_kv(
        "Avg game length",
        &format!("{:.2} moves", result.average_game_length),
    );
    print_kv("Q-values stored", &format_number(result.table_size));
}

/// Print the agent's stored values for every legal action of `piles`
///
/// Only the `limit` best actions are listed; unvisited actions are counted.
pub fn print_action_values(agent: &QLearningAgent, piles: &Piles, limit: usize) {
    print_subsection(&format!("Learned values for {piles}"));

    let values = agent.action_values(piles.as_slice());
    let mut stored: Vec<_> = values
        .iter()
        .filter_map(|&(action, value)| value.map(|q| (action, q)))
        .collect();
    stored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    for (action, q) in stored.iter().take(limit) {
        println!("  {:28} {q:+.4}", action.to_string());
    }
    let unvisited = values.len() - stored.len();
    if unvisited > 0 {
        println!("  ({unvisited} actions never visited)");
    }
}

/// Human-readable seat label
pub fn seat_label(player: Player, human: Player) -> &'static str {
    if player == human { "Human" } else { "AI" }
}
