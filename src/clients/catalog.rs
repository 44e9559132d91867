use std::future::Future;

use crate::clients::{entities::LookupResult, errors::Result};

/// Anything that can resolve an artist name to its best catalog match.
///
/// The reconciler only depends on this trait; `SpotifyClient` is the
/// production implementation and tests plug in an in-memory catalog.
pub trait ArtistCatalog {
    /// Search the catalog for `name` and return the top hit, if any.
    fn search_artist(&self, name: &str) -> impl Future<Output = Result<LookupResult>>;
}
