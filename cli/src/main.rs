//! Ballot CLI: replay scripted voting sessions and inspect saved ballots.

mod config;
mod session;

use anyhow::Context;
use ballot_utils::LogFormat;
use ballot_voting::Ballot;
use clap::Parser;
use config::SessionConfig;
use session::Report;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ballot", about = "Delegated voting sessions from the command line")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the session file's `log_level`.
    #[arg(long, global = true, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format: "human" or "json". Overrides the session file.
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Open a ballot from a session file, apply its steps and print the tally.
    Run {
        /// Path to the TOML session file.
        #[arg(long, env = "BALLOT_CONFIG")]
        config: PathBuf,

        /// Stop at the first rejected step instead of skipping it.
        #[arg(long)]
        strict: bool,

        /// Submit each caller's steps from its own task against a shared ballot.
        #[arg(long)]
        concurrent: bool,

        /// Write the final ballot state to this file.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Load a saved ballot and print its tally.
    Inspect {
        /// Path to a snapshot written by `run --snapshot-out`.
        #[arg(long)]
        snapshot: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            strict,
            concurrent,
            snapshot_out,
            json,
        } => {
            let session = SessionConfig::load(&config)?;
            let level = cli.log_level.as_deref().unwrap_or(&session.log_level);
            ballot_utils::init_logging(cli.log_format.unwrap_or(session.log_format), level)?;
            tracing::info!(
                "Loaded session from {} ({} steps)",
                config.display(),
                session.steps.len()
            );

            let outcome = if concurrent {
                session::replay_concurrent(&session, strict).await?
            } else {
                session::replay(&session, strict)?
            };
            if let Some(path) = snapshot_out {
                save_snapshot(&outcome.ballot, &path)?;
                tracing::info!("Snapshot written to {}", path.display());
            }
            print_report(&Report::for_session(&outcome), json)?;
        }
        Command::Inspect { snapshot, json } => {
            let level = cli.log_level.as_deref().unwrap_or("info");
            ballot_utils::init_logging(cli.log_format.unwrap_or_default(), level)?;

            let ballot = load_snapshot(&snapshot)?;
            print_report(&Report::for_ballot(&ballot), json)?;
        }
    }

    Ok(())
}

fn print_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn save_snapshot(ballot: &Ballot, path: &Path) -> anyhow::Result<()> {
    let bytes = ballot.save_state()?;
    std::fs::write(path, bytes).with_context(|| format!("writing snapshot {}", path.display()))
}

fn load_snapshot(path: &Path) -> anyhow::Result<Ballot> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    Ballot::load_state(&bytes).with_context(|| format!("loading snapshot {}", path.display()))
}
