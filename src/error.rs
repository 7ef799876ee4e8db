use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid card format: {0}")]
    Format(String),
    #[error("Missing input: {0}")]
    Precondition(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
