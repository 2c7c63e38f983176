use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
