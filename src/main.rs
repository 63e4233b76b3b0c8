//! contribs - GitHub user contribution history fetcher
//!
//! Main entry point for the contribs CLI.

use anyhow::Context;
use clap::Parser;
use contribs::{merge, CommitsQuery, Contributions};
use std::process;

/// Fetch a GitHub user's commit history across repositories and branches
#[derive(Parser, Debug)]
#[command(name = "contribs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// GitHub login whose commits to fetch
    login: String,

    /// Restrict to specific repositories (repeatable; default: all)
    #[arg(short, long = "repo")]
    repositories: Vec<String>,

    /// Restrict to specific branches (repeatable; default: all)
    #[arg(short, long = "branch")]
    branches: Vec<String>,

    /// OAuth2 application client id
    #[arg(long, env = "GITHUB_CLIENT_ID")]
    client_id: String,

    /// OAuth2 application client secret
    #[arg(long, env = "GITHUB_CLIENT_SECRET")]
    client_secret: String,

    /// Cap on concurrent API requests per stage
    #[arg(long, default_value = "16")]
    concurrency: usize,

    /// Print the raw per-branch result instead of the merged report
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    contribs::logging::init()?;

    let cli = Cli::parse();

    let client = Contributions::github(cli.client_id, cli.client_secret)?
        .with_concurrency_limit(cli.concurrency);

    let query = CommitsQuery::new(&cli.login)
        .repositories(cli.repositories)
        .branches(cli.branches);

    let result = client
        .commits(&query)
        .await
        .with_context(|| format!("Failed to fetch commits for {}", cli.login))?;

    if cli.raw {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for report in merge::merge_all(&result) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
