//! Error types for the message protocol

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to encode or decode message: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not a message at all (empty, or not a JSON object)
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}
