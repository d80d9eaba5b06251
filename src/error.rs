//! Error types shared by the signer, the upstream client, and the server.

use thiserror::Error;

/// Signing failed. Always a configuration problem, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// A credential field is empty or missing
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Failure of a relayed GetItems call.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request could not be signed
    #[error("failed to sign request: {0}")]
    Signing(#[from] SigningError),

    /// The request payload could not be serialized
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The upstream could not be reached or the body could not be read
    #[error("upstream request failed: {0}")]
    Transport(#[from] wreq::Error),

    /// The upstream answered with a non-success status
    #[error("upstream returned status {status}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The upstream body was not a GetItems response
    #[error("failed to decode upstream response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RelayError {
    /// Returns true when the failure originated upstream rather than locally.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RelayError::Transport(_) | RelayError::UpstreamStatus { .. } | RelayError::Decode(_)
        )
    }
}
