//! `octoget search` - search repositories.

use anyhow::Result;

use super::Context;
use super::utils::{build_client, parse_params, print_records};

/// Run the search command.
pub fn run(ctx: &Context, query: &str, params: &[String]) -> Result<()> {
    let params = parse_params(params)?;
    let client = build_client(ctx)?;
    print_records(ctx, client.search_repositories(query, params))
}
