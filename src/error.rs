use ::scraper::error::SelectorErrorKind;
use std::num::ParseFloatError;
use std::path::PathBuf;

/// All errors that can occur while refreshing a roster or looking up a player.
#[derive(thiserror::Error, Debug)]
pub enum KdError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON document we expected.
    #[error("invalid json from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),

    /// A request URL could not be assembled from the configured base.
    #[error("invalid url: {url}")]
    InvalidUrl { url: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Scraped stat text is not a number.
    #[error("failed to parse stat {text:?}: {source}")]
    StatParse {
        text: String,
        source: ParseFloatError,
    },

    /// Scraped stat parsed but is negative or not finite.
    #[error("stat out of range: {value}")]
    InvalidStat { value: f64 },

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// The roster file could not be read.
    #[error("failed to read roster {}: {source}", path.display())]
    RosterRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The roster file is not a valid roster document.
    #[error("malformed roster {}: {source}", path.display())]
    RosterFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The refreshed roster could not be written back.
    #[error("failed to write roster {}: {source}", path.display())]
    RosterWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The stats API knows no player with that nickname.
    #[error("player {nickname:?} not found")]
    PlayerNotFound { nickname: String },
}

impl<'a> From<SelectorErrorKind<'a>> for KdError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        KdError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KdError>;
