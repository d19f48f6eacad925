//! Headless match runner.
//!
//! Loads a RON scenario, turns every side into a bot and lets the runtime
//! play the match to completion.
//!
//! ```bash
//! cargo run -p battle-sim -- scenarios/duel.ron
//! RUST_LOG=runtime::ai=debug cargo run -p battle-sim -- scenarios/duel.ron --format json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use battle_core::{Controller, Difficulty, MatchId, SideId};
use battle_runtime::{MatchEvent, MatchSummary, Runtime, RuntimeConfig, Scenario};
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;

/// Run a bot-vs-bot battle from a scenario file
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Headless bot-vs-bot battle runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty given to human-controlled sides
    #[arg(short, long, default_value = "normal")]
    difficulty: Difficulty,

    /// Bot thinking delay in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Seed of the decision engine
    #[arg(long, default_value_t = 0)]
    bot_seed: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Winner and one line per log entry
    Summary,
    /// Full terminal summary as JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut scenario = Scenario::load_from_file(&cli.scenario)
        .with_context(|| format!("loading {}", cli.scenario.display()))?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    for side in [&mut scenario.side_a, &mut scenario.side_b] {
        if side.controller == Controller::Human {
            side.controller = Controller::Bot {
                difficulty: cli.difficulty,
            };
        }
    }
    tracing::info!("Running '{}' with seed {}", scenario.name, scenario.seed);

    let config = RuntimeConfig {
        bot_seed: cli.bot_seed,
        ..RuntimeConfig::default()
    }
    .with_bot_delay(Duration::from_millis(cli.delay_ms));
    let mut runtime = Runtime::builder().config(config).build();

    let match_id = MatchId(1);
    let handle = runtime.create_match(scenario.into_setup(match_id))?;
    let mut events = handle
        .subscribe()
        .context("match channel closed before the first turn")?;

    let summary = loop {
        match events.recv().await {
            Ok(MatchEvent::Update(update)) => {
                for entry in &update.events {
                    tracing::debug!("[{}] {}", entry.version, entry.result.summary);
                }
            }
            Ok(MatchEvent::Ended(summary)) => break summary,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Skipped {} updates; the final log is still complete", skipped);
            }
            Err(RecvError::Closed) => bail!("event stream ended before the match did"),
        }
    };

    let state = handle.snapshot().await?;
    let root = hex::encode(state.state_root());
    runtime.evict(match_id).await?;

    match cli.format {
        OutputFormat::Summary => print_summary(&summary, state.turn.number, &root),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "summary": summary,
                "turns": state.turn.number,
                "state_root": root,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn print_summary(summary: &MatchSummary, turns: u32, root: &str) {
    for entry in &summary.final_event_log {
        let side = match entry.acting_side {
            SideId::A => "A",
            SideId::B => "B",
        };
        println!(
            "{:>4} t{:<3} {} {:<18} {}",
            entry.sequence,
            entry.turn,
            side,
            entry.action.action_type(),
            entry.result.summary
        );
    }
    println!();
    println!(
        "{} wins by {:?} after {} turns ({} events)",
        summary.winner,
        summary.reason,
        turns,
        summary.final_event_log.len()
    );
    println!("state root {root}");
}
