use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

pub type RankResult<T> = Result<T, RankError>;
