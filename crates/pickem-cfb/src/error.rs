use thiserror::Error;

/// Failures fetching or decoding external team data.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("no CollegeFootballData API key configured (set CFBD_API_KEY or config/credentials.toml)")]
    MissingApiKey,
}
