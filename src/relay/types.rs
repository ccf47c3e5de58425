//! Relay Core Types
//!
//! Request, outcome and event types for the transfer-with-fee protocol.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core_types::{Account, Amount, AssetHash};

/// Per-request correlation id - ULID based
///
/// Generated by the relay for every invocation and carried in every log line.
/// Unrelated to the off-chain `intent_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelayId(ulid::Ulid);

impl RelayId {
    /// Generate a new unique RelayId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for RelayId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RelayId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// A transfer-with-fee request
///
/// `intent_id` is an opaque correlation token generated off-chain.
/// The relay never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Account,
    pub to: Account,
    pub asset: AssetHash,
    pub gross_amount: Amount,
    pub fee_in_asset: Amount,
    pub intent_id: String,
}

impl TransferRequest {
    pub fn new(
        from: Account,
        to: Account,
        asset: AssetHash,
        gross_amount: Amount,
        fee_in_asset: Amount,
        intent_id: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            asset,
            gross_amount,
            fee_in_asset,
            intent_id: intent_id.into(),
        }
    }

    /// `gross_amount - fee_in_asset`, unclamped.
    ///
    /// Returns `None` only when the subtraction overflows `i64`.
    #[inline]
    pub fn net_amount(&self) -> Option<Amount> {
        self.gross_amount.checked_sub(self.fee_in_asset)
    }
}

/// Result of a successful request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
    pub relay_id: RelayId,
    pub net_amount: Amount,
}

/// `TransferWithFee` record published after both legs landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: Account,
    pub to: Account,
    pub asset: AssetHash,
    pub net_amount: Amount,
    pub fee_in_asset: Amount,
    pub intent_id: String,
}

impl TransferEvent {
    /// Event name as seen by off-chain observers
    pub const NAME: &'static str = "TransferWithFee";

    pub fn from_request(req: &TransferRequest, net_amount: Amount) -> Self {
        Self {
            from: req.from,
            to: req.to,
            asset: req.asset,
            net_amount,
            fee_in_asset: req.fee_in_asset,
            intent_id: req.intent_id.clone(),
        }
    }
}
