use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("News provider error: {0}")]
    News(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Article {0} not found")]
    NotFound(i64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
