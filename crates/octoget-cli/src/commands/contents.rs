//! `octoget contents` - list the contents of a repository path.

use anyhow::Result;

use super::Context;
use super::utils::{build_client, parse_params, parse_slug, print_records};

/// Run the contents command.
pub fn run(ctx: &Context, repo: &str, path: Option<&str>, params: &[String]) -> Result<()> {
    let (owner, name) = parse_slug(repo)?;
    let params = parse_params(params)?;
    let client = build_client(ctx)?;
    print_records(ctx, client.contents(owner, name, path.unwrap_or(""), params))
}
