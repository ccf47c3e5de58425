//! Gasless Relay
//!
//! Entry points of the transfer-with-fee protocol. Drives one request
//! strictly in order:
//!
//! ```text
//! Authorization Gate → Balance Guard → Executor (net leg, fee leg) → Event
//! ```
//!
//! Nothing is retried. The relay keeps no balances; the only state it owns
//! is the in-flight sender set and whatever the authorizer tracks.

use std::sync::Arc;

use dashmap::DashSet;
use tracing::{debug, info, warn};

use super::asset::AssetRegistry;
use super::error::RelayError;
use super::events::EventEmitter;
use super::executor::TransferExecutor;
use super::guard::BalanceGuard;
use super::state::RelayState;
use super::types::{RelayId, TransferEvent, TransferOutcome, TransferRequest};
use crate::auth::{AllowAll, IntentSignature, SignatureAuthorizer, TransferAuthorizer};
use crate::config::{AuthMode, RelayConfig};
use crate::core_types::{Account, Amount, AssetHash};

pub struct GaslessRelay {
    assets: Arc<AssetRegistry>,
    authorizer: Arc<dyn TransferAuthorizer>,
    executor: TransferExecutor,
    events: EventEmitter,
    /// Senders with a request in flight. `None` = reentrancy guard off.
    in_flight: Option<DashSet<Account>>,
}

/// Holds a sender's in-flight slot for the duration of one request
struct InFlightGuard<'a> {
    set: &'a DashSet<Account>,
    from: Account,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.from);
    }
}

impl GaslessRelay {
    /// Build a relay with the authorizer named in `config`.
    ///
    /// In `ed25519` mode the authorizer starts with no registered keys and
    /// denies everything; use [`GaslessRelay::with_authorizer`] to supply a
    /// populated [`SignatureAuthorizer`].
    pub fn new(config: &RelayConfig, assets: Arc<AssetRegistry>, events: EventEmitter) -> Self {
        let authorizer: Arc<dyn TransferAuthorizer> = match config.authorization {
            AuthMode::AllowAll => Arc::new(AllowAll),
            AuthMode::Ed25519 => Arc::new(SignatureAuthorizer::new()),
        };
        Self::with_authorizer(config, assets, authorizer, events)
    }

    pub fn with_authorizer(
        config: &RelayConfig,
        assets: Arc<AssetRegistry>,
        authorizer: Arc<dyn TransferAuthorizer>,
        events: EventEmitter,
    ) -> Self {
        if authorizer.name() == "allow_all" {
            warn!("Relay running with fail-open authorization: every request is authorized");
        }
        info!(
            authorizer = authorizer.name(),
            atomicity = ?config.atomicity,
            fee_sink = %config.fee_sink,
            reentrancy_guard = config.reentrancy_guard,
            "Gasless relay ready"
        );

        Self {
            assets,
            authorizer,
            executor: TransferExecutor::new(config.fee_sink, config.atomicity),
            events,
            in_flight: config.reentrancy_guard.then(DashSet::new),
        }
    }

    /// Host witness check.
    ///
    /// The host passes nothing request-specific here, so this cannot bind
    /// the decision to a sender or intent. Request binding happens in
    /// [`GaslessRelay::submit`].
    pub fn verify(&self) -> bool {
        self.authorizer.verify_witness()
    }

    /// The state-changing entry point. Every failure collapses to `false`.
    pub async fn transfer_with_fee_from_amount(
        &self,
        from: Account,
        to: Account,
        asset: AssetHash,
        gross_amount: Amount,
        fee_in_asset: Amount,
        intent_id: impl Into<String>,
    ) -> bool {
        let req = TransferRequest::new(from, to, asset, gross_amount, fee_in_asset, intent_id);
        self.submit(req, None).await.is_ok()
    }

    /// Run one request with an optional intent signature.
    pub async fn submit(
        &self,
        req: TransferRequest,
        proof: Option<&IntentSignature>,
    ) -> Result<TransferOutcome, RelayError> {
        let relay_id = RelayId::new();
        debug!(
            relay_id = %relay_id,
            intent_id = %req.intent_id,
            from = %req.from,
            to = %req.to,
            asset = %req.asset,
            gross_amount = req.gross_amount,
            fee_in_asset = req.fee_in_asset,
            state = %RelayState::Init,
            "Relay request received"
        );

        let _slot = match self.lock_sender(req.from) {
            Some(slot) => slot,
            None => {
                warn!(relay_id = %relay_id, from = %req.from, "Reentrant request rejected");
                return Err(RelayError::Reentrant);
            }
        };

        if let Err(e) = self.authorizer.authorize(&req, proof) {
            warn!(
                relay_id = %relay_id,
                intent_id = %req.intent_id,
                state = %RelayState::Denied,
                error = %e,
                "Request denied"
            );
            return Err(e.into());
        }
        debug!(relay_id = %relay_id, state = %RelayState::Authorized, "Request authorized");

        let result = self.run(relay_id, &req).await;
        match &result {
            Ok(_) => self.authorizer.on_committed(&req),
            Err(e) => {
                let state = e.final_state(self.executor.atomicity());
                if state.is_in_flight() {
                    // funds moved: the intent must never be reserved again
                    warn!(
                        relay_id = %relay_id,
                        intent_id = %req.intent_id,
                        state = %state,
                        code = e.code(),
                        "Request failed with net leg in place, intent consumed"
                    );
                    self.authorizer.on_committed(&req);
                } else {
                    warn!(
                        relay_id = %relay_id,
                        intent_id = %req.intent_id,
                        state = %state,
                        code = e.code(),
                        "Request failed"
                    );
                    self.authorizer.on_aborted(&req);
                }
            }
        }
        result
    }

    async fn run(
        &self,
        relay_id: RelayId,
        req: &TransferRequest,
    ) -> Result<TransferOutcome, RelayError> {
        let asset = self
            .assets
            .resolve(&req.asset)
            .ok_or(RelayError::UnknownAsset(req.asset))?;

        if !BalanceGuard::check(asset.as_ref(), req.from, req.gross_amount).await {
            return Err(RelayError::InsufficientBalance);
        }
        debug!(relay_id = %relay_id, state = %RelayState::BalanceChecked, "Balance sufficient");

        let net_amount = self.executor.execute(relay_id, req, asset.as_ref()).await?;

        self.events.emit(TransferEvent::from_request(req, net_amount));
        info!(
            relay_id = %relay_id,
            intent_id = %req.intent_id,
            state = %RelayState::Committed,
            net_amount,
            fee_in_asset = req.fee_in_asset,
            "Transfer with fee committed"
        );

        Ok(TransferOutcome {
            relay_id,
            net_amount,
        })
    }

    /// `None` if the guard is on and `from` already has a request in flight
    fn lock_sender(&self, from: Account) -> Option<Option<InFlightGuard<'_>>> {
        match &self.in_flight {
            None => Some(None),
            Some(set) if set.insert(from) => Some(Some(InFlightGuard { set, from })),
            Some(_) => None,
        }
    }

    pub fn authorizer(&self) -> &Arc<dyn TransferAuthorizer> {
        &self.authorizer
    }

    pub fn assets(&self) -> &Arc<AssetRegistry> {
        &self.assets
    }

    pub fn fee_sink(&self) -> Account {
        self.executor.fee_sink()
    }
}
