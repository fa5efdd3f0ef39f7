//! octoget CLI - fetch records from the paginated GitHub REST API.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = commands::Context {
        api_url: cli.api_url,
        limit: cli.limit,
    };

    let result = match cli.command {
        Commands::Get { endpoint, params } => commands::get::run(&ctx, &endpoint, &params),
        Commands::Search { query, params } => commands::search::run(&ctx, &query, &params),
        Commands::Commits { repo, params } => commands::commits::run(&ctx, &repo, &params),
        Commands::Contents { repo, path, params } => {
            commands::contents::run(&ctx, &repo, path.as_deref(), &params)
        }
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Route library diagnostics (rate-limit notices and the like) to stderr,
/// filtered by `RUST_LOG` and defaulting to `warn`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
