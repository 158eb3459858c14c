use thiserror::Error;

/// Failures while decoding or encoding socket frames
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("frame with action {action:?} has an unexpected shape: {source}")]
    InvalidShape {
        action: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),
}
