// Copyright 2026 Kitscout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use kitscout::adapters;
use kitscout::aggregate::Aggregator;
use kitscout::fetch::Fetcher;
use kitscout::query::{SearchQuery, GRADE_CODES};
use kitscout::rest;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "kitscout",
    about = "Kitscout — search every Gundam kit store at once",
    version
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the search API server
    Serve {
        /// Port for the HTTP API
        #[arg(long, default_value = "7400")]
        port: u16,
    },
    /// Run one search from the terminal
    Search {
        /// Grade code (HG, RG, MG, PG, SD, RE, FM, EG)
        #[arg(long)]
        grade: Option<String>,
        /// Model name, e.g. "strike freedom"
        #[arg(required = true)]
        model: Vec<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port } => {
            let aggregator = Arc::new(Aggregator::new(
                adapters::registry(),
                Arc::new(Fetcher::new()),
            ));
            rest::start(port, aggregator).await
        }
        Commands::Search { grade, model, json } => run_search(grade, model, json).await,
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "kitscout=debug" } else { "kitscout=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default.parse().expect("valid directive")),
        )
        .init();
}

async fn run_search(grade: Option<String>, model: Vec<String>, json: bool) -> Result<()> {
    // The grade menu is a presentation concern; this boundary enforces the
    // closed set, the server does not.
    if let Some(g) = grade.as_deref() {
        if !GRADE_CODES.iter().any(|code| code.eq_ignore_ascii_case(g)) {
            bail!(
                "unknown grade '{g}' (expected one of: {})",
                GRADE_CODES.join(", ")
            );
        }
    }

    let params = SearchQuery {
        grade,
        model: Some(model.join(" ")),
    };
    let Some(query) = params.normalize() else {
        bail!("model is required");
    };

    let aggregator = Aggregator::new(adapters::registry(), Arc::new(Fetcher::new()));
    let listings = aggregator.search(&query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        eprintln!("no matches for '{query}'");
        return Ok(());
    }
    for listing in &listings {
        if listing.is_error() {
            eprintln!("  [{}] {}", listing.site, listing.name);
        } else {
            println!("  {:<10} {:<18} {}", listing.price, listing.site, listing.name);
            println!("             {}", listing.link);
        }
    }
    Ok(())
}
