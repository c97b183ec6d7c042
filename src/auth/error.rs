use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credentials rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("no answer after {0:?}")]
    Timeout(Duration),
    #[error("invalid auth url: {0}")]
    Url(#[from] url::ParseError),
}

impl AuthError {
    /// The auth server answered and refused the request.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
