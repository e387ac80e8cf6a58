use thiserror::Error;

/// Errors raised by the Otter client.
///
/// Remote failures (non-2xx statuses, unparseable bodies) are not errors; they
/// come back inside an [`Envelope`](crate::client::Envelope).
#[derive(Debug, Error)]
pub enum OtterError {
    /// An authenticated operation was attempted before login stored a user id
    #[error("userid is invalid")]
    InvalidSession,

    /// The HTTP exchange could not be completed
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, OtterError>;
