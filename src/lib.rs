//! Artist reconciler - flag spam artist entries against the Spotify catalog
//!
//! Reads a CSV of artist names, searches Spotify for each one and annotates
//! every row with a `delete? Y/N` recommendation based on how closely the
//! top hit's name matches the listed name.

/// Keep/delete decision and the name similarity score
pub mod classifier;
/// Client modules for interacting with external services
pub mod clients;
/// Credentials and endpoint configuration
pub mod config;
/// CSV table handling and the per-row reconciliation loop
pub mod reconciler;
