use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;
