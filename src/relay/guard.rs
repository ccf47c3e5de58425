//! Balance Guard
//!
//! Sole gate against insufficient-funds requests. Pure read.

use tracing::debug;

use super::asset::FungibleAsset;
use crate::core_types::{Account, Amount};

pub struct BalanceGuard;

impl BalanceGuard {
    /// `true` iff `from` holds at least `gross_amount` of `asset`.
    ///
    /// Does not look at the fee: a fee larger than the gross amount passes.
    pub async fn check(asset: &dyn FungibleAsset, from: Account, gross_amount: Amount) -> bool {
        let balance = asset.balance_of(from).await;
        let ok = balance >= gross_amount;
        debug!(
            from = %from,
            asset = asset.symbol(),
            balance,
            gross_amount,
            ok,
            "Balance check"
        );
        ok
    }
}
