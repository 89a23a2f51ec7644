use std::io;
use thiserror::Error;

/// The primary error type for the `ztesms` library.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("LD not found.")]
    ChallengeUnavailable,

    #[error("Account is locked.")]
    AccountLocked,

    #[error("Login unsuccessful.")]
    LoginFailed { result: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid modem address: {0}")]
    InvalidAddress(String),

    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("State store error: {0}")]
    Store(#[from] io::Error),

    #[error("No usable state directory on this system")]
    NoStateDir,
}
