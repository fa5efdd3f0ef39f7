//! GitHub API client.

use reqwest::Client;

use crate::auth::Auth;
use crate::error::Result;
use crate::headers::{self, LATEST_API_VERSION};
use crate::paginate::{Paginated, REQUEST_TIMEOUT};

/// GitHub API client.
///
/// Bundles the immutable header map (baked into the underlying
/// `reqwest::Client` once, at construction) and the base URL. All
/// operations go through [`GitHubClient::get`], which returns a lazy
/// [`Paginated`] sequence of records; the named helpers below are pure
/// argument shaping over it.
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingCredential`] if `auth` resolves to
    /// no token. No network I/O is performed.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub
    /// Enterprise).
    ///
    /// # Errors
    /// Returns error if the credential is missing or the HTTP client
    /// cannot be constructed.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let headers = headers::build(auth, LATEST_API_VERSION)?;

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch an endpoint as a lazy paginated sequence of records.
    ///
    /// Relative paths resolve against the base URL; absolute URLs pass
    /// through unchanged. `params` apply to the first page only - the
    /// server's next-link carries them forward.
    #[must_use]
    pub fn get(&self, endpoint: &str, params: Vec<(String, String)>) -> Paginated {
        let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_owned()
        } else {
            format!("{}{}", self.base_url, endpoint)
        };
        Paginated::new(self.http.clone(), url, params)
    }

    /// Search repositories matching `query`.
    #[must_use]
    pub fn search_repositories(&self, query: &str, mut params: Vec<(String, String)>) -> Paginated {
        params.insert(0, ("q".to_owned(), query.to_owned()));
        self.get("/search/repositories", params)
    }

    /// List commits of a repository.
    #[must_use]
    pub fn commits(&self, owner: &str, repo: &str, params: Vec<(String, String)>) -> Paginated {
        self.get(&format!("/repos/{owner}/{repo}/commits"), params)
    }

    /// List the contents of a path within a repository.
    #[must_use]
    pub fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Paginated {
        self.get(&format!("/repos/{owner}/{repo}/contents/{path}"), params)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
