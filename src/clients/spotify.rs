use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::clients::{
    catalog::ArtistCatalog,
    entities::{AccessToken, CatalogArtist, Credentials, LookupResult},
    errors::{Error, Result},
};
use crate::config::{Config, ConfigBuilder};

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize, Debug, Default)]
struct SpotifyAPIFollowers {
    #[serde(default)]
    total: u64,
}

#[derive(Deserialize, Debug)]
struct SpotifyAPIArtist {
    name: String,
    id: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    popularity: u32,
    #[serde(default)]
    followers: SpotifyAPIFollowers,
}

#[derive(Deserialize, Debug)]
struct ArtistPage {
    items: Vec<SpotifyAPIArtist>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    artists: ArtistPage,
}

impl From<SpotifyAPIArtist> for CatalogArtist {
    fn from(a: SpotifyAPIArtist) -> CatalogArtist {
        CatalogArtist {
            name: a.name,
            id: a.id,
            genres: a.genres,
            popularity: a.popularity,
            followers: a.followers.total,
        }
    }
}

impl SearchResponse {
    // only the first item is relevant, the search is issued with limit=1
    fn into_lookup(self, search_term: &str) -> LookupResult {
        LookupResult {
            search_term: search_term.to_string(),
            artist: self.artists.items.into_iter().next().map(CatalogArtist::from),
        }
    }
}

/// Spotify Web API client using the client-credentials grant.
///
/// The token is requested once and reused for every search of the run.
pub struct SpotifyClient {
    http: reqwest::Client,
    credentials: Credentials,
    accounts_url: String,
    api_url: String,
    token: Option<AccessToken>,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        SpotifyClient {
            http: reqwest::Client::new(),
            credentials: config.credentials,
            accounts_url: config.accounts_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    // Create a SpotifyClient from environment variables or raise a configuration error
    pub fn try_default() -> Result<Self> {
        Ok(Self::new(ConfigBuilder::new().build()?))
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    // Exchange client credentials for a bearer token. Non-200 responses are fatal.
    pub async fn request_token(&self) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_url);
        debug!("Requesting Spotify access token from {url}");
        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            debug!("Token endpoint answered {status}");
            return Err(Error::AuthError(body));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken(token.access_token))
    }

    // Authorize the client. All searches use the token obtained here for the whole run.
    pub async fn authorize_client(&mut self) -> Result<()> {
        let token = self.request_token().await?;
        self.token = Some(token);
        debug!("Spotify client authorized");
        Ok(())
    }

    /// Search for `name` with `type=artist&limit=1`. Requires `authorize_client` first.
    pub async fn search(&self, name: &str) -> Result<LookupResult> {
        let token = self.token.as_ref().ok_or_else(|| {
            Error::ConfigurationError("Spotify client is not authorized".into())
        })?;
        let url = format!("{}/v1/search", self.api_url);
        debug!("Searching Spotify for artist {name:?}");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token.0)
            .query(&[("q", name), ("type", "artist"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(Error::ApiError(body));
        }

        let search: SearchResponse = serde_json::from_str(&body)?;
        Ok(search.into_lookup(name))
    }
}

impl ArtistCatalog for SpotifyClient {
    async fn search_artist(&self, name: &str) -> Result<LookupResult> {
        self.search(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_item_becomes_the_match() {
        let body = json!({
            "artists": {
                "href": "https://api.spotify.com/v1/search?query=madonna&type=artist&limit=1",
                "items": [{
                    "name": "Madonna",
                    "id": "6tbjWDEIzxoDsBA1FuhfPW",
                    "genres": ["dance pop", "pop"],
                    "popularity": 78,
                    "followers": { "href": null, "total": 9_000_000 },
                    "type": "artist"
                }],
                "limit": 1,
                "total": 800
            }
        });
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        let lookup = response.into_lookup("madonna");

        assert!(lookup.exists());
        assert_eq!(lookup.search_term, "madonna");
        assert_eq!(lookup.retrieved_name(), Some("Madonna"));
        let artist = lookup.artist.unwrap();
        assert_eq!(artist.id, "6tbjWDEIzxoDsBA1FuhfPW");
        assert_eq!(artist.genres, vec!["dance pop", "pop"]);
        assert_eq!(artist.popularity, 78);
        assert_eq!(artist.followers, 9_000_000);
    }

    #[test]
    fn empty_items_means_not_found() {
        let body = json!({ "artists": { "items": [] } });
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(
            response.into_lookup("xyzzyqwerty"),
            LookupResult::not_found("xyzzyqwerty")
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let body = json!({ "artists": { "items": [{ "name": "Nobody", "id": "abc" }] } });
        let response: SearchResponse = serde_json::from_value(body).unwrap();
        let artist = response.into_lookup("Nobody").artist.unwrap();
        assert!(artist.genres.is_empty());
        assert_eq!(artist.popularity, 0);
        assert_eq!(artist.followers, 0);
    }

    #[tokio::test]
    async fn search_requires_authorization() {
        let config = Config {
            credentials: Credentials::new("id", "secret"),
            accounts_url: "http://127.0.0.1:9".into(),
            api_url: "http://127.0.0.1:9".into(),
        };
        let client = SpotifyClient::new(config);
        assert!(!client.is_authorized());
        let err = client.search("Madonna").await.unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }
}
