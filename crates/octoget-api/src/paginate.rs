//! Paginated fetch loop with rate-limit backoff.
//!
//! [`Paginated`] is a forward-only, finite, non-restartable producer of
//! records. It issues one GET per page, unwraps records from the body,
//! follows the `Link: rel="next"` header until none remains, and sleeps
//! through GitHub primary-rate-limit exhaustion instead of failing.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Bound on each page request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Lazy sequence of result records drawn from consecutive pages.
///
/// Records are delivered in order via [`Paginated::try_next`]; at most one
/// page is buffered at a time. Page N+1 is never fetched before page N's
/// records have been handed out.
pub struct Paginated {
    http: Client,
    next_url: Option<String>,
    /// Query parameters for the first page only. The next-link already
    /// encodes everything needed for subsequent pages.
    params: Vec<(String, String)>,
    buffer: VecDeque<Value>,
}

impl Paginated {
    pub(crate) fn new(http: Client, url: String, params: Vec<(String, String)>) -> Self {
        Self {
            http,
            next_url: Some(url),
            params,
            buffer: VecDeque::new(),
        }
    }

    /// Yield the next record, fetching the next page when the current one
    /// is exhausted.
    ///
    /// Returns `Ok(None)` once the terminal page (no next-link) has been
    /// drained. May suspend the calling task during rate-limit backoff.
    ///
    /// # Errors
    /// Any non-success, non-rate-limit response or undecodable body aborts
    /// the sequence; records already yielded remain valid.
    pub async fn try_next(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }

            let Some(url) = self.next_url.take() else {
                return Ok(None);
            };
            self.fetch_page(&url).await?;
        }
    }

    /// Drain the remaining records into a `Vec`.
    ///
    /// # Errors
    /// See [`Paginated::try_next`].
    pub async fn try_collect(mut self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        while let Some(record) = self.try_next().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Fetch one page into the buffer, retrying the identical request
    /// after rate-limit exhaustion.
    async fn fetch_page(&mut self, url: &str) -> Result<()> {
        loop {
            let mut req = self.http.get(url).timeout(REQUEST_TIMEOUT);
            if !self.params.is_empty() {
                req = req.query(&self.params);
            }
            let response = req.send().await?;
            let status = response.status();

            if status == StatusCode::FORBIDDEN
                && rate_limit_exhausted(response.headers())
                && let Some(reset) = reset_timestamp(response.headers())
            {
                let wait = backoff_duration(reset);
                warn!(
                    wait_secs = wait.as_secs(),
                    url, "rate limit exhausted, sleeping until reset"
                );
                tokio::time::sleep(wait).await;
                // Same URL, same params; no record came out of this attempt.
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let next = next_link(response.headers());
            let text = response.text().await?;
            let body: Value = serde_json::from_str(&text)?;

            self.buffer.extend(unwrap_records(body));
            debug!(url, records = self.buffer.len(), next = next.is_some(), "fetched page");

            self.next_url = next;
            self.params.clear();
            return Ok(());
        }
    }
}

impl std::fmt::Debug for Paginated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginated")
            .field("next_url", &self.next_url)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

/// Unwrap the records carried by a page body.
///
/// Search-style endpoints wrap results under `"items"`; list endpoints
/// return a bare array; anything else is a single record.
fn unwrap_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                // "items" exists but is not an array; keep the object whole.
                map.insert("items".to_owned(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => vec![other],
    }
}

/// Primary rate limit reports zero remaining quota.
fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers.get(RATE_LIMIT_REMAINING).is_some_and(|v| v == "0")
}

/// Unix timestamp at which the quota resets, if the server sent one.
fn reset_timestamp(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RATE_LIMIT_RESET)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// `max(reset - now, 0) + 1` seconds.
fn backoff_duration(reset: u64) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    Duration::from_secs(reset.saturating_sub(now) + 1)
}

/// Extract the `rel="next"` URL from a `Link` response header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    parse_link_header(headers.get("link")?.to_str().ok()?, "next")
}

/// Parse an RFC 5988 `Link` header and return the URL for the given rel.
///
/// Format: `<url>; rel="next", <url>; rel="last"`.
fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel)
            && r == target_rel
        {
            return Some(u.to_owned());
        }
    }

    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn paginated(url: String) -> Paginated {
        Paginated::new(Client::new(), url, Vec::new())
    }

    // === Record unwrapping ===

    #[test]
    fn test_unwrap_items_field_in_order() {
        let body = json!({"total_count": 2, "items": [{"id": 1}, {"id": 2}]});
        assert_eq!(unwrap_records(body), vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn test_unwrap_bare_array_in_order() {
        let body = json!([{"sha": "a"}, {"sha": "b"}, {"sha": "c"}]);
        assert_eq!(
            unwrap_records(body),
            vec![json!({"sha": "a"}), json!({"sha": "b"}), json!({"sha": "c"})]
        );
    }

    #[test]
    fn test_unwrap_single_object() {
        let body = json!({"rate": {"limit": 5000}});
        assert_eq!(unwrap_records(body.clone()), vec![body]);
    }

    #[test]
    fn test_unwrap_non_array_items_is_one_record() {
        let body = json!({"items": "not-a-list", "name": "x"});
        assert_eq!(unwrap_records(body.clone()), vec![body]);
    }

    // === Link header parsing ===

    #[test]
    fn test_parse_link_header_next() {
        let header = r#"<https://api.github.com/resource?page=2>; rel="next", <https://api.github.com/resource?page=5>; rel="last""#;
        assert_eq!(
            parse_link_header(header, "next"),
            Some("https://api.github.com/resource?page=2".to_owned())
        );
    }

    #[test]
    fn test_parse_link_header_no_next() {
        let header = r#"<https://api.github.com/resource?page=1>; rel="prev""#;
        assert_eq!(parse_link_header(header, "next"), None);
    }

    // === Fetch loop ===

    #[tokio::test]
    async fn test_two_pages_are_two_calls_in_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .and(query_param("per_page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(
                        "link",
                        format!(
                            r#"<{}/repos/o/r/commits?page=2>; rel="next""#,
                            mock_server.uri()
                        )
                        .as_str(),
                    )
                    .set_body_json(json!([{"sha": "a"}, {"sha": "b"}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"sha": "c"}])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetch = Paginated::new(
            Client::new(),
            format!("{}/repos/o/r/commits", mock_server.uri()),
            vec![("per_page".to_owned(), "2".to_owned())],
        );
        let records = fetch.try_collect().await.unwrap();

        assert_eq!(
            records,
            vec![json!({"sha": "a"}), json!({"sha": "b"}), json!({"sha": "c"})]
        );
    }

    #[tokio::test]
    async fn test_empty_terminal_page_ends_without_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut fetch = paginated(format!("{}/repos/o/r/commits", mock_server.uri()));
        assert!(fetch.try_next().await.unwrap().is_none());
        // Non-restartable: a drained sequence stays drained.
        assert!(fetch.try_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_fatal_with_no_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut fetch = paginated(format!("{}/boom", mock_server.uri()));
        let err = fetch.try_next().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_forbidden_without_exhausted_quota_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/private"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "42")
                    .set_body_string("forbidden"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut fetch = paginated(format!("{}/private", mock_server.uri()));
        let err = fetch.try_next().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_rate_limited_page_is_retried_not_skipped() {
        let mock_server = MockServer::start().await;

        // First attempt: quota exhausted, reset already in the past, so the
        // loop sleeps the minimum one second and retries the same request.
        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "0")
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"sha": "a"}])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let start = std::time::Instant::now();
        let fetch = paginated(format!("{}/repos/o/r/commits", mock_server.uri()));
        let records = fetch.try_collect().await.unwrap();

        // Only the successful attempt's records; the failed one yields none.
        assert_eq!(records, vec![json!({"sha": "a"})]);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_rate_limited_without_reset_header_is_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/o/r/commits"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_string("no reset stamp"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut fetch = paginated(format!("{}/repos/o/r/commits", mock_server.uri()));
        let err = fetch.try_next().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let mut fetch = paginated(format!("{}/garbage", mock_server.uri()));
        let err = fetch.try_next().await.unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_backoff_duration_past_reset_is_one_second() {
        assert_eq!(backoff_duration(0), Duration::from_secs(1));
    }
}
