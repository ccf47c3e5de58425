//! Relay Error Types
//!
//! Closed taxonomy of request failures. Whether a failure left funds moved
//! depends on the atomicity mode: see [`RelayError::final_state`].

use thiserror::Error;

use super::state::RelayState;
use crate::auth::AuthError;
use crate::config::AtomicityMode;
use crate::core_types::AssetHash;

/// Relay error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    // === Authorization ===
    #[error("Not authorized to act for sender: {0}")]
    Unauthorized(#[from] AuthError),

    // === Validation ===
    #[error("Asset not registered: {0}")]
    UnknownAsset(AssetHash),

    #[error("Net amount would overflow")]
    Overflow,

    #[error("Sender already has a request in flight")]
    Reentrant,

    // === Funds ===
    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Net transfer rejected by asset contract")]
    TransferFailed,

    #[error("Fee transfer rejected by asset contract")]
    FeeTransferFailed,

    /// Fee leg failed and the net leg could not be reversed.
    /// Funds are at the recipient; needs manual intervention.
    #[error("Fee transfer failed and net transfer could not be reversed")]
    CompensationFailed,
}

impl RelayError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Unauthorized(_) => "UNAUTHORIZED",
            RelayError::UnknownAsset(_) => "UNKNOWN_ASSET",
            RelayError::Overflow => "OVERFLOW",
            RelayError::Reentrant => "REENTRANT",
            RelayError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            RelayError::TransferFailed => "TRANSFER_FAILED",
            RelayError::FeeTransferFailed => "FEE_TRANSFER_FAILED",
            RelayError::CompensationFailed => "COMPENSATION_FAILED",
        }
    }

    /// State the request ends in when it fails with this error.
    ///
    /// In host mode a rejected fee leg leaves the request at `NET_SENT`: the
    /// recipient keeps the net amount unless the host rolls back.
    pub fn final_state(&self, atomicity: AtomicityMode) -> RelayState {
        match self {
            RelayError::Unauthorized(_) | RelayError::Reentrant => RelayState::Denied,
            RelayError::UnknownAsset(_)
            | RelayError::Overflow
            | RelayError::InsufficientBalance
            | RelayError::TransferFailed => RelayState::Failed,
            RelayError::FeeTransferFailed => match atomicity {
                AtomicityMode::Host => RelayState::NetSent,
                AtomicityMode::Compensate => RelayState::RolledBack,
            },
            RelayError::CompensationFailed => RelayState::Compensating,
        }
    }
}
