use thiserror::Error;

use crate::models::RecordKind;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Gateway returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unknown field '{field}' for {kind}")]
    UnknownField { kind: RecordKind, field: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
