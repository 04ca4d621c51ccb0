use thiserror::Error;

/// Errors raised while talking to the backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status} from {path}")]
    Status { status: u16, path: String },

    #[error("Unable to decode response from {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Unable to read map image {path}: {reason}")]
    Image { path: String, reason: String },
}
