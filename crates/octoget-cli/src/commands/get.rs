//! `octoget get` - fetch an arbitrary REST endpoint.

use anyhow::Result;

use super::Context;
use super::utils::{build_client, parse_params, print_records};

/// Run the get command.
pub fn run(ctx: &Context, endpoint: &str, params: &[String]) -> Result<()> {
    let params = parse_params(params)?;
    let client = build_client(ctx)?;
    print_records(ctx, client.get(endpoint, params))
}
