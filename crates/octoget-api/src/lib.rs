//! # octoget-api
//!
//! Minimal client for the paginated GitHub REST API: builds authenticated
//! headers once, follows `Link`-header pagination, and sleeps through
//! primary-rate-limit exhaustion.
//!
//! ```rust,no_run
//! use octoget_api::{Auth, GitHubClient};
//!
//! # async fn run() -> octoget_api::Result<()> {
//! let client = GitHubClient::new(&Auth::auto())?;
//! let mut repos = client.search_repositories("language:rust", Vec::new());
//! while let Some(repo) = repos.try_next().await? {
//!     println!("{}", repo["full_name"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Authentication tokens are held as `SecretString`, which zeroizes memory
//! when dropped, and the authorization header is marked sensitive.

mod auth;
mod client;
mod error;
pub mod headers;
mod paginate;

pub use auth::{Auth, TOKEN_ENV_VAR};
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use headers::LATEST_API_VERSION;
pub use paginate::Paginated;
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
