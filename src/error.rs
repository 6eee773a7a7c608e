use thiserror::Error;

/// Failure kinds seen while fetching and normalizing a results page.
///
/// Only `Transport` ever reaches a caller. `Parse` and `Item` are absorbed by
/// the detector and walker and show up as log lines plus fewer results.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not read page data: {0}")]
    Parse(String),

    #[error("could not normalize item: {0}")]
    Item(String),
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::Item(err.to_string())
    }
}

impl From<regex::Error> for ScrapeError {
    fn from(err: regex::Error) -> Self {
        ScrapeError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
