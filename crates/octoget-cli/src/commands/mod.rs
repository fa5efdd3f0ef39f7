//! Command-line definitions for octoget.

use clap::{Parser, Subcommand};

pub mod commits;
pub mod contents;
pub mod get;
pub mod search;
mod utils;

/// Fetch records from the paginated GitHub REST API.
#[derive(Parser)]
#[command(name = "octoget", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub API base URL (override for GitHub Enterprise).
    #[arg(
        long,
        global = true,
        value_name = "URL",
        default_value = octoget_api::GitHubClient::DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Maximum number of records to print.
    #[arg(long, global = true, value_name = "N", default_value_t = 3)]
    pub limit: usize,
}

/// Settings shared by every subcommand.
pub struct Context {
    pub api_url: String,
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch an arbitrary REST endpoint, e.g. `/rate_limit`.
    Get {
        /// Endpoint path starting with `/`, or an absolute URL.
        endpoint: String,

        /// Extra query parameter as key=value (repeatable).
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Search repositories.
    Search {
        /// Search query, e.g. `language:rust stars:>1000`.
        query: String,

        /// Extra query parameter as key=value (repeatable).
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// List commits of a repository.
    Commits {
        /// Repository slug as `owner/repo`.
        repo: String,

        /// Extra query parameter as key=value (repeatable).
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// List the contents of a repository path.
    Contents {
        /// Repository slug as `owner/repo`.
        repo: String,

        /// Path within the repository (repository root when omitted).
        path: Option<String>,

        /// Extra query parameter as key=value (repeatable).
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}
