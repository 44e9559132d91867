use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to get Spotify access token: {0}")]
    AuthError(String),

    #[error("Spotify API error: {0}")]
    ApiError(String),

    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Spotify Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to parse CSV input: {0}")]
    ParseError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
