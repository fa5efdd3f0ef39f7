//! Authentication handling for the GitHub API.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Environment variable consulted when no explicit token is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_PAT";

/// Credential source for GitHub API requests.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Use a specific token.
    Token(SecretString),

    /// Read the token from an environment variable.
    EnvVar(String),
}

impl Auth {
    /// Create auth that reads the token from [`TOKEN_ENV_VAR`].
    #[must_use]
    pub fn auto() -> Self {
        Self::EnvVar(TOKEN_ENV_VAR.into())
    }

    /// Resolve the credential to a token.
    ///
    /// # Errors
    /// Returns [`Error::MissingCredential`] if the token is absent or empty.
    /// This happens at resolution time, before any network I/O.
    pub fn resolve(&self) -> Result<SecretString> {
        match self {
            Self::Token(t) if t.expose_secret().is_empty() => Err(Error::MissingCredential),
            Self::Token(t) => Ok(t.clone()),
            Self::EnvVar(var) => match std::env::var(var) {
                Ok(value) if !value.is_empty() => Ok(SecretString::from(value)),
                _ => Err(Error::MissingCredential),
            },
        }
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::auto()
    }
}
