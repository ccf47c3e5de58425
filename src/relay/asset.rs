//! Asset Capability
//!
//! Narrow interface to an external fungible-token contract, plus the registry
//! that resolves a contract hash to a live asset.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::core_types::{Account, Amount, AssetHash};

/// External fungible-token contract (NEP-17 shaped)
///
/// The relay never owns balances; every mutation goes through `transfer`.
/// Calls are awaited one at a time within a request.
#[async_trait]
pub trait FungibleAsset: Send + Sync {
    /// Asset symbol for logging
    fn symbol(&self) -> &str;

    /// Current balance of `account`
    async fn balance_of(&self, account: Account) -> Amount;

    /// Move `amount` from `from` to `to`.
    ///
    /// Returns `false` if the contract rejected the transfer. A rejected
    /// transfer must leave balances untouched.
    async fn transfer(
        &self,
        from: Account,
        to: Account,
        amount: Amount,
        data: Option<&[u8]>,
    ) -> bool;
}

/// Contract hash → asset lookup
#[derive(Default)]
pub struct AssetRegistry {
    assets: DashMap<AssetHash, Arc<dyn FungibleAsset>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the asset deployed at `hash`
    pub fn register(&self, hash: AssetHash, asset: Arc<dyn FungibleAsset>) {
        self.assets.insert(hash, asset);
    }

    pub fn resolve(&self, hash: &AssetHash) -> Option<Arc<dyn FungibleAsset>> {
        self.assets.get(hash).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, hash: &AssetHash) -> bool {
        self.assets.remove(hash).is_some()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
