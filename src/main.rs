//! Tile Runner entry point
//!
//! Runs one headless episode: generates a level from the seed, hands it to
//! the chosen policy, and prints the final state dump. `RUST_LOG=debug` for
//! per-decision logging, `--json` for a machine-readable summary line.

use std::io::BufRead;
use std::sync::mpsc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tile_runner::sim::{generate_level, Action};
use tile_runner::{Episode, Policy};

fn usage() -> ! {
    eprintln!("usage: tile-runner [seed] [budget-ms] [policy] [--json]");
    eprintln!("  seed       : controls the level layout and policy randomness");
    eprintln!("  budget-ms  : think-time bank for the whole episode, in milliseconds");
    eprintln!("  policy     : idle | advance | random | human | search");
    eprintln!("  --json     : print a JSON summary line after the run");
    std::process::exit(1);
}

/// Human play from stdin: one `r`/`u`/`l` per line, anything else idles.
fn stdin_policy() -> Policy {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(action) = line.chars().next().and_then(Action::from_key) {
                if tx.send(action).is_err() {
                    break;
                }
            }
        }
    });
    Policy::human(rx)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .map(|a| a.as_str())
        .filter(|a| !a.starts_with("--"))
        .collect();

    let seed = match positional.first() {
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| usage()),
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
    };
    let budget_ms = match positional.get(1) {
        Some(s) => s.parse::<u64>().unwrap_or_else(|_| usage()),
        None => 1000,
    };
    let policy_name = positional.get(2).copied().unwrap_or("search");
    let policy = if policy_name == "human" {
        stdin_policy()
    } else {
        Policy::from_name(policy_name, seed).unwrap_or_else(|| usage())
    };

    log::info!(
        "seed {seed}, budget {budget_ms}ms, policy {}",
        policy.name()
    );

    let state = generate_level(seed);
    let mut episode = Episode::new(state, policy, Duration::from_millis(budget_ms));
    let summary = episode.run();

    println!("{}", episode.state());
    log::info!(
        "finished: {} steps, score {}, distance {}{}",
        summary.steps,
        summary.score,
        summary.max_distance,
        if summary.forfeited { " (forfeited)" } else { "" }
    );

    if json {
        let line = serde_json::json!({
            "seed": seed,
            "steps": summary.steps,
            "score": summary.score,
            "max_distance": summary.max_distance,
            "forfeited": summary.forfeited,
        });
        println!("{line}");
    }
}
