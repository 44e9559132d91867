//! Runtime configuration: credentials and endpoint base URLs.
//!
//! Values set on [`ConfigBuilder`] win over environment variables, which in
//! turn win over the built-in defaults. Credentials have no default.

use crate::clients::{
    entities::Credentials,
    errors::{Error, Result},
};

/// Environment variable holding the Spotify client id
pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable holding the Spotify client secret
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
/// Environment variable overriding the accounts (token) base URL
pub const ACCOUNTS_URL_VAR: &str = "SPOTIFY_ACCOUNTS_URL";
/// Environment variable overriding the Web API base URL
pub const API_URL_VAR: &str = "SPOTIFY_API_URL";

/// Default base URL of the token endpoint
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
/// Default base URL of the Web API
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Resolved configuration for a Spotify client
#[derive(Debug, Clone)]
pub struct Config {
    /// Client credentials exchanged for a bearer token
    pub credentials: Credentials,
    /// Base URL of the token endpoint
    pub accounts_url: String,
    /// Base URL of the search endpoint
    pub api_url: String,
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    accounts_url: Option<String>,
    api_url: Option<String>,
}

impl ConfigBuilder {
    /// Empty builder, everything resolved from the environment on `build`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both credentials explicitly
    #[must_use]
    pub fn credentials(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Override the accounts base URL
    #[must_use]
    pub fn accounts_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_url = Some(url.into());
        self
    }

    /// Override the Web API base URL
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Resolve the configuration, failing when credentials are missing
    pub fn build(self) -> Result<Config> {
        let client_id = match self.client_id {
            Some(id) => id,
            None => required_var(CLIENT_ID_VAR)?,
        };
        let client_secret = match self.client_secret {
            Some(secret) => secret,
            None => required_var(CLIENT_SECRET_VAR)?,
        };
        let accounts_url = self
            .accounts_url
            .or_else(|| std::env::var(ACCOUNTS_URL_VAR).ok())
            .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string());
        let api_url = self
            .api_url
            .or_else(|| std::env::var(API_URL_VAR).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config {
            credentials: Credentials::new(client_id, client_secret),
            accounts_url,
            api_url,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|e| {
        Error::ConfigurationError(format!(
            "{name}: {e}. Set it in the environment or in a .env file"
        ))
    })
}
