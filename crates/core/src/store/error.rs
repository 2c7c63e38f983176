use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("document store unreachable: {0}")]
    Transport(String),
    #[error("document store responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed document store response: {0}")]
    Decode(String),
    #[error("cannot write a non-object value as a field set at {0}")]
    NotAnObject(String),
}
