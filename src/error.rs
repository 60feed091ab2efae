//! Error types for the search widget.
//!
//! `InvalidInput` and `Busy` are submit rejections that callers ignore.
//! `Status`, `Request` and `Decode` are transport failures. They are logged
//! and collapse into the generic error panel.

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("query is empty")]
    InvalidInput,

    #[error("a search is already in flight")]
    Busy,

    #[error("search endpoint returned HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("search session is not running")]
    SessionClosed,

    #[error("invalid value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
}

impl SearchError {
    /// True for the failures that end a search cycle in the error state.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            SearchError::Status(_) | SearchError::Request(_) | SearchError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
