use anyhow::{Context as _, Result};
use octoget_api::{Auth, GitHubClient, Paginated};

use super::Context;
use crate::output;

/// Character budget for each printed record.
const TRUNCATE_CHARS: usize = 700;

/// Parse repeated `key=value` arguments into query parameters.
pub fn parse_params(kvs: &[String]) -> Result<Vec<(String, String)>> {
    kvs.iter()
        .map(|kv| {
            kv.split_once('=')
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .with_context(|| format!("invalid parameter '{kv}' - expected key=value"))
        })
        .collect()
}

/// Split an `owner/repo` slug.
pub fn parse_slug(repo: &str) -> Result<(&str, &str)> {
    repo.split_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
        .with_context(|| format!("invalid repository '{repo}' - expected owner/repo"))
}

/// Build a client against the configured API URL. Fails before any
/// network I/O when no credential is available.
pub fn build_client(ctx: &Context) -> Result<GitHubClient> {
    let client = GitHubClient::with_base_url(&Auth::auto(), ctx.api_url.as_str())?;
    Ok(client)
}

/// Drive the paginated fetch and print up to `ctx.limit` records, each as
/// pretty JSON truncated to a fixed character budget.
pub fn print_records(ctx: &Context, mut fetch: Paginated) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let printed = rt.block_on(async {
        let mut printed = 0usize;
        while printed < ctx.limit {
            let Some(record) = fetch.try_next().await? else {
                break;
            };
            output::essential(truncate(&serde_json::to_string_pretty(&record)?, TRUNCATE_CHARS));
            printed += 1;
        }
        Ok::<_, anyhow::Error>(printed)
    })?;

    if printed == 0 {
        output::info("no records");
    }

    Ok(())
}

/// Truncate on a character boundary.
fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
