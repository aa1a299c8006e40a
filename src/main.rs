//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use cp_tracker::{
    cli::{Commands, CpTracker, GetCmd},
    commands::{
        analysis::handle_analysis,
        contests::handle_contests,
        describe_error,
        profile::{handle_contest_graph, handle_heatmap, handle_profile},
    },
    Tracker, TrackerConfig, LOG_ENV_VAR,
};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(tracker: &Tracker, cmd: GetCmd) -> cp_tracker::Result<()> {
    match cmd {
        GetCmd::Profile { user } => handle_profile(tracker, &user.username, user.json).await,
        GetCmd::Heatmap { user } => handle_heatmap(tracker, &user.username, user.json).await,
        GetCmd::ContestGraph { user } => {
            handle_contest_graph(tracker, &user.username, user.json).await
        }
        GetCmd::Analysis { usernames, json } => handle_analysis(tracker, &usernames, json).await,
        GetCmd::Contests {
            upcoming,
            platforms,
            json,
        } => handle_contests(tracker, upcoming, platforms.as_deref(), json).await,
    }
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = CpTracker::parse();

    let config = TrackerConfig::from_env().context("invalid tracker configuration")?;
    let tracker = Tracker::new(&config).context("failed to build HTTP client")?;

    match app.command {
        Commands::Get { cmd } => {
            if let Err(e) = run(&tracker, cmd).await {
                eprintln!("{}", describe_error(&e));
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
