use thiserror::Error;

#[derive(Error, Debug)]
pub enum DjError {
    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Playback API error: {0}")]
    PlaybackError(String),

    #[error("No tracks found for query: {0:?}")]
    NoSearchResults(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DjError>;
