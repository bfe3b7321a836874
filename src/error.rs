use reqwest::StatusCode;
use thiserror::Error;

/// Everything that makes project data unavailable. The page shows the same
/// fallback card for all of them; the variant only feeds the log line.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(StatusCode),

    #[error("response is not JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a list of repositories, got {0}")]
    NotAList(&'static str),

    #[error("malformed repository record: {0}")]
    Record(#[source] serde_json::Error),
}
