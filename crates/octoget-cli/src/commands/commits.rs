//! `octoget commits` - list commits of a repository.

use anyhow::Result;

use super::Context;
use super::utils::{build_client, parse_params, parse_slug, print_records};

/// Run the commits command.
pub fn run(ctx: &Context, repo: &str, params: &[String]) -> Result<()> {
    let (owner, name) = parse_slug(repo)?;
    let params = parse_params(params)?;
    let client = build_client(ctx)?;
    print_records(ctx, client.commits(owner, name, params))
}
