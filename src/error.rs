use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure to decode a single raw node or page container.
///
/// Node-level variants are recovered locally: the event decoder downgrades
/// the offending node to `EventKind::Unknown` and never lets the error cross
/// its boundary. `MalformedPage` is the one fatal case — the response is not
/// a well-formed container of edges at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("timeline node has no __typename discriminator")]
    MissingTypename { raw: Value },
    #[error("malformed {type_name} node: {reason}")]
    MalformedNode {
        type_name: String,
        reason: String,
        raw: Value,
    },
    #[error("response is not a timeline page: {0}")]
    MalformedPage(String),
}

impl DecodeError {
    pub fn malformed(type_name: &str, reason: impl Into<String>, raw: &Value) -> Self {
        DecodeError::MalformedNode {
            type_name: type_name.to_string(),
            reason: reason.into(),
            raw: raw.clone(),
        }
    }
}

/// Fetch-layer error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(String),
    #[error("http transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("github returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        retriable: bool,
    },
    #[error("graphql errors: {0}")]
    Graphql(String),
    #[error("{kind} {owner}/{repo}#{number} not found")]
    NotFound {
        kind: &'static str,
        owner: String,
        repo: String,
        number: i64,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Whether a retry with backoff could plausibly succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::Status { retriable, .. } => *retriable,
            Error::Transport(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
