//! Transfer Executor
//!
//! Computes the net amount and performs the two asset movements:
//! net amount to the recipient, then the fee to the burn sink.
//!
//! # Leg order
//!
//! ```text
//! net:  from → to        (gross - fee)
//! fee:  from → fee_sink  (fee)
//! ```
//!
//! The order is fixed. Tooling that inspects sub-calls relies on it.
//!
//! # Atomicity
//!
//! - [`AtomicityMode::Host`]: a fee-leg failure is reported without touching
//!   the net leg. Only safe when a surrounding host transaction rolls back
//!   the whole invocation on failure.
//! - [`AtomicityMode::Compensate`]: a fee-leg failure triggers a reverse
//!   transfer `to → from` of the net amount before failure is reported.

use tracing::{debug, error, info, warn};

use super::asset::FungibleAsset;
use super::error::RelayError;
use super::state::RelayState;
use super::types::{RelayId, TransferRequest};
use crate::config::AtomicityMode;
use crate::core_types::{Account, Amount};

pub struct TransferExecutor {
    fee_sink: Account,
    atomicity: AtomicityMode,
}

impl TransferExecutor {
    pub fn new(fee_sink: Account, atomicity: AtomicityMode) -> Self {
        Self {
            fee_sink,
            atomicity,
        }
    }

    #[inline]
    pub fn fee_sink(&self) -> Account {
        self.fee_sink
    }

    #[inline]
    pub fn atomicity(&self) -> AtomicityMode {
        self.atomicity
    }

    /// Run both legs. Returns the net amount delivered.
    ///
    /// The net amount is fixed before any call. A negative net is passed to
    /// the asset unchanged; whatever the asset does with it is the result.
    pub async fn execute(
        &self,
        relay_id: RelayId,
        req: &TransferRequest,
        asset: &dyn FungibleAsset,
    ) -> Result<Amount, RelayError> {
        let net_amount = req.net_amount().ok_or(RelayError::Overflow)?;

        // Leg 1: net → recipient
        if !asset.transfer(req.from, req.to, net_amount, None).await {
            debug!(
                relay_id = %relay_id,
                state = %RelayState::Failed,
                net_amount,
                "Net transfer rejected, fee leg skipped"
            );
            return Err(RelayError::TransferFailed);
        }
        debug!(relay_id = %relay_id, state = %RelayState::NetSent, net_amount, "Net leg landed");

        // Leg 2: fee → burn sink
        if asset
            .transfer(req.from, self.fee_sink, req.fee_in_asset, None)
            .await
        {
            return Ok(net_amount);
        }

        match self.atomicity {
            AtomicityMode::Host => {
                warn!(
                    relay_id = %relay_id,
                    net_amount,
                    fee_in_asset = req.fee_in_asset,
                    "Fee transfer rejected; net leg left in place for host rollback"
                );
                Err(RelayError::FeeTransferFailed)
            }
            AtomicityMode::Compensate => self.compensate(relay_id, req, asset, net_amount).await,
        }
    }

    /// Reverse the net leg after a fee-leg failure
    async fn compensate(
        &self,
        relay_id: RelayId,
        req: &TransferRequest,
        asset: &dyn FungibleAsset,
        net_amount: Amount,
    ) -> Result<Amount, RelayError> {
        debug!(relay_id = %relay_id, state = %RelayState::Compensating, "Reversing net leg");

        if asset.transfer(req.to, req.from, net_amount, None).await {
            info!(
                relay_id = %relay_id,
                state = %RelayState::RolledBack,
                net_amount,
                "Fee transfer rejected, net leg reversed"
            );
            Err(RelayError::FeeTransferFailed)
        } else {
            error!(
                relay_id = %relay_id,
                state = %RelayState::Compensating,
                from = %req.from,
                to = %req.to,
                net_amount,
                intent_id = %req.intent_id,
                "Net leg reversal rejected! Funds remain at recipient without fee collection"
            );
            Err(RelayError::CompensationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::memory::{AssetCall, InMemoryAsset};

    const ALICE: Account = Account::from_low_u8(1);
    const BOB: Account = Account::from_low_u8(2);
    const NEO: Account = Account::from_low_u8(0xee);

    fn req(gross: Amount, fee: Amount) -> TransferRequest {
        TransferRequest::new(ALICE, BOB, NEO, gross, fee, "uuid-123")
    }

    fn transfer(from: Account, to: Account, amount: Amount, accepted: bool) -> AssetCall {
        AssetCall::Transfer {
            from,
            to,
            amount,
            accepted,
        }
    }

    #[tokio::test]
    async fn test_both_legs_in_order() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let net = exec.execute(RelayId::new(), &req(100, 5), &asset).await;
        assert_eq!(net, Ok(95));
        assert_eq!(
            asset.transfers(),
            vec![
                transfer(ALICE, BOB, 95, true),
                transfer(ALICE, Account::ZERO, 5, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_net_leg_failure_skips_fee_leg() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        asset.reject_recipient(BOB);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let res = exec.execute(RelayId::new(), &req(100, 5), &asset).await;
        assert_eq!(res, Err(RelayError::TransferFailed));
        assert_eq!(asset.transfer_count(), 1);
        assert_eq!(asset.balance(&ALICE), 100);
    }

    #[tokio::test]
    async fn test_compensate_reverses_net_leg() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        asset.reject_recipient(Account::ZERO);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let res = exec.execute(RelayId::new(), &req(100, 5), &asset).await;
        assert_eq!(res, Err(RelayError::FeeTransferFailed));
        assert_eq!(asset.balance(&ALICE), 100);
        assert_eq!(asset.balance(&BOB), 0);
        assert_eq!(
            asset.transfers(),
            vec![
                transfer(ALICE, BOB, 95, true),
                transfer(ALICE, Account::ZERO, 5, false),
                transfer(BOB, ALICE, 95, true),
            ]
        );
    }

    #[tokio::test]
    async fn test_compensation_failure_reported() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        asset.reject_recipient(Account::ZERO);
        // reversal goes to ALICE
        asset.reject_recipient(ALICE);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let res = exec.execute(RelayId::new(), &req(100, 5), &asset).await;
        assert_eq!(res, Err(RelayError::CompensationFailed));
        assert_eq!(asset.balance(&BOB), 95);
    }

    #[tokio::test]
    async fn test_host_mode_leaves_net_leg() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        asset.reject_recipient(Account::ZERO);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Host);

        let res = exec.execute(RelayId::new(), &req(100, 5), &asset).await;
        assert_eq!(res, Err(RelayError::FeeTransferFailed));
        // Known gap without a host transaction: net leg stays
        assert_eq!(asset.balance(&BOB), 95);
        assert_eq!(asset.balance(&ALICE), 5);
        assert_eq!(asset.transfer_count(), 2);
    }

    #[tokio::test]
    async fn test_negative_net_passed_through() {
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 100);
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let res = exec.execute(RelayId::new(), &req(5, 10), &asset).await;
        assert_eq!(res, Err(RelayError::TransferFailed));
        assert_eq!(asset.transfers(), vec![transfer(ALICE, BOB, -5, false)]);
    }

    #[tokio::test]
    async fn test_overflow_makes_no_calls() {
        let asset = InMemoryAsset::new("NEO");
        let exec = TransferExecutor::new(Account::ZERO, AtomicityMode::Compensate);

        let res = exec.execute(RelayId::new(), &req(Amount::MAX, -1), &asset).await;
        assert_eq!(res, Err(RelayError::Overflow));
        assert!(asset.calls().is_empty());
    }

    #[tokio::test]
    async fn test_custom_fee_sink() {
        let sink = Account::from_low_u8(0xde);
        let asset = InMemoryAsset::new("NEO");
        asset.mint(ALICE, 10);
        let exec = TransferExecutor::new(sink, AtomicityMode::Host);

        assert_eq!(exec.execute(RelayId::new(), &req(10, 3), &asset).await, Ok(7));
        assert_eq!(asset.balance(&sink), 3);
        assert_eq!(exec.fee_sink(), sink);
    }
}
