//! Request header construction for GitHub REST calls.
//!
//! The header map is built exactly once per client and never mutated
//! afterwards; the fetch loop reuses it for every page.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;

use crate::auth::Auth;
use crate::error::Result;

/// Latest GitHub REST API version, sent as `X-GitHub-Api-Version`.
pub const LATEST_API_VERSION: &str = "2022-11-28";

/// Identification string sent as `User-Agent`.
pub const IDENT: &str = concat!("octoget/", env!("CARGO_PKG_VERSION"));

/// Header name for the API version marker.
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Build the fixed set of request headers for GitHub REST v3 calls.
///
/// The map contains exactly four entries: bearer authorization, the API
/// version marker, the JSON media-type `Accept`, and the identification
/// string. The authorization value is marked sensitive so it is redacted
/// from debug output.
///
/// # Errors
/// Returns [`Error::MissingCredential`] if `auth` resolves to no token.
/// No network I/O is performed.
pub fn build(auth: &Auth, api_version: &str) -> Result<HeaderMap> {
    let token = auth.resolve()?;

    let mut authorization =
        HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
    authorization.set_sensitive(true);

    let version = HeaderValue::from_str(api_version)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(API_VERSION_HEADER, version);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(IDENT));

    Ok(headers)
}
