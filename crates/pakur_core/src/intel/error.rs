use thiserror::Error;

/// Failures raised below the service boundary. They never reach the UI as
/// errors; [`super::IntelService`] logs them and substitutes fallbacks.
#[derive(Debug, Error)]
pub enum IntelError {
    #[cfg(feature = "gemini")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no API credential configured")]
    MissingCredential,
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model output does not match the declared schema: {0}")]
    Schema(#[from] serde_json::Error),
}
