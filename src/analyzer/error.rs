use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to reach engine process: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine transport unavailable: {0}")]
    Transport(String),

    #[error("Engine request failed: {0}")]
    Request(String),

    #[error("Engine returned a malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
