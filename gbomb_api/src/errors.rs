//! Error types for the API client.

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP exchange itself failed (network error, timeout, malformed request).
    #[error("Request failed")]
    Transport(#[source] BoxError),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// Pagination was asked to move outside `0..total`.
    #[error("No more results (offset {offset}, total {total})")]
    Exhausted { offset: i64, total: i64 },
    /// The response body did not have the expected shape.
    #[error("Failed to decode response")]
    Decode(#[from] DecodeError),
    /// The rate limiter wait was aborted by the caller's cancellation token.
    #[error("Request cancelled while waiting for the rate limiter")]
    Cancelled,
    /// The endpoint and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A feed entry's `pubDate` could not be parsed.
    #[error("Invalid publish date: {0}")]
    PublishDate(#[from] chrono::ParseError),
}

impl Error {
    /// Returns true for any [`Error::Decode`] variant.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Returns true when pagination has run out in the requested direction.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Exhausted { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

/// Reasons a response body could not be decoded.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid XML feed: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("feed entry guid {0:?} has no numeric episode segment")]
    Guid(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(DecodeError::Json(e))
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        Error::Decode(DecodeError::Xml(e))
    }
}
