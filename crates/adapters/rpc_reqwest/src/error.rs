//! Transport-specific error type wrapping reqwest errors.

use orgsync_domain::error::OrgsyncError;

/// Errors originating from the RPC transport layer.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The request never produced a usable response.
    #[error("rpc request failed")]
    Transport(#[from] reqwest::Error),

    /// The peer answered with a status the contract does not account for.
    #[error("unexpected rpc status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code as sent by the peer.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

impl From<RpcError> for OrgsyncError {
    fn from(err: RpcError) -> Self {
        Self::Rpc(Box::new(err))
    }
}
