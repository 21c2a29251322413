use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("GitHub API returned HTTP {0}")]
    Transport(reqwest::StatusCode),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("GraphQL response carried no data")]
    MissingData,

    #[error("Year {0} is outside the supported range")]
    InvalidYear(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;
