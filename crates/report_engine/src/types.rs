use std::fmt;

/// Bytes and metadata of a completed page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

/// Where a fetch ended up and what the server said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    /// URL the request started from.
    pub original_url: String,
    /// URL the response came from, after redirects.
    pub final_url: String,
    pub redirect_count: usize,
    /// Content-Type header as sent, parameters included.
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// A failed fetch: the classified kind plus the underlying message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

/// What went wrong with a fetch, coarse enough to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => f.write_str("invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::RedirectLimitExceeded => f.write_str("redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => match actual {
                Some(actual) => write!(f, "response larger than {max_bytes} bytes ({actual})"),
                None => write!(f, "response larger than {max_bytes} bytes"),
            },
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => f.write_str("network error"),
        }
    }
}
