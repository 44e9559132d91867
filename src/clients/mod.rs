/// Lookup abstraction used by the reconciler
pub mod catalog;
/// Data entities for credentials and lookup results
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Spotify Web API client
pub mod spotify;

pub use catalog::ArtistCatalog;
pub use spotify::SpotifyClient;
