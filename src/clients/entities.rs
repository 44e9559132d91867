/// Client credentials used for the client-credentials grant
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Bearer token, valid for the whole run
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

/// Top search hit as returned by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogArtist {
    pub name: String,
    pub id: String,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub followers: u64,
}

/// Outcome of a single artist search. `artist` is the top hit, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub search_term: String,
    pub artist: Option<CatalogArtist>,
}

impl LookupResult {
    pub fn not_found(search_term: impl Into<String>) -> Self {
        LookupResult {
            search_term: search_term.into(),
            artist: None,
        }
    }

    pub fn exists(&self) -> bool {
        self.artist.is_some()
    }

    pub fn retrieved_name(&self) -> Option<&str> {
        self.artist.as_ref().map(|a| a.name.as_str())
    }
}
