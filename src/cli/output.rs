//! Output formatting for CLI

use crate::pipeline::ComparisonResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a comparison table, one row per agent
pub fn print_comparison(results: &[ComparisonResult]) {
    println!(
        "  {:<32} {:>10} {:>14} {:>14} {:>10}",
        "Agent", "Episodes", "Mean (last100)", "Greedy mean", "Time (s)"
    );
    println!("  {}", "-".repeat(84));
    for result in results {
        println!(
            "  {:<32} {:>10} {:>14.3} {:>14.3} {:>10.3}",
            result.name,
            result.episodes,
            result.mean_reward_last_100,
            result.greedy_mean_reward,
            result.training_secs
        );
    }
}
