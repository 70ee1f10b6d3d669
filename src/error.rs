use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the lyric corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read corpus file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus file {} is not valid UTF-8: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("corpus {} contains no lines", path.display())]
    Empty { path: PathBuf },
}

/// Failures talking to the Twitter REST API.
#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("twitter api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode twitter response: {source}; body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("failed to sign request: {0}")]
    Signing(#[from] hmac::digest::InvalidLength),
}

/// Exit code for a bad config file, flag combination, or log filter.
pub const CONFIG_EXIT_CODE: u8 = 2;

/// A failed run, tagged by the phase that failed.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("authentication failed: {0}")]
    Authentication(#[source] TwitterError),

    #[error("posting failed: {0}")]
    Post(#[source] TwitterError),
}

impl BotError {
    /// Process exit code for this failure class. A gate skip exits 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            BotError::Corpus(_) => 3,
            BotError::Authentication(_) => 4,
            BotError::Post(_) => 5,
        }
    }
}
