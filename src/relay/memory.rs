//! In-memory asset ledger
//!
//! Deterministic stand-in for a live token contract. Records every call so
//! tests can assert ordering, and supports failure injection per recipient.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::asset::FungibleAsset;
use crate::core_types::{Account, Amount};

/// One observed call on the asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetCall {
    BalanceOf(Account),
    Transfer {
        from: Account,
        to: Account,
        amount: Amount,
        accepted: bool,
    },
}

pub struct InMemoryAsset {
    symbol: String,
    balances: Mutex<HashMap<Account, Amount>>,
    calls: Mutex<Vec<AssetCall>>,
    /// Transfers *to* these accounts are rejected
    rejected_recipients: Mutex<HashSet<Account>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryAsset {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            balances: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            rejected_recipients: Mutex::new(HashSet::new()),
        }
    }

    /// Credit `amount` to `account` out of thin air
    pub fn mint(&self, account: Account, amount: Amount) {
        *lock(&self.balances).entry(account).or_insert(0) += amount;
    }

    pub fn balance(&self, account: &Account) -> Amount {
        lock(&self.balances).get(account).copied().unwrap_or(0)
    }

    /// Reject every future transfer whose recipient is `account`
    pub fn reject_recipient(&self, account: Account) {
        lock(&self.rejected_recipients).insert(account);
    }

    pub fn accept_recipient(&self, account: &Account) {
        lock(&self.rejected_recipients).remove(account);
    }

    pub fn calls(&self) -> Vec<AssetCall> {
        lock(&self.calls).clone()
    }

    /// Transfer calls only, in order
    pub fn transfers(&self) -> Vec<AssetCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| matches!(c, AssetCall::Transfer { .. }))
            .cloned()
            .collect()
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers().len()
    }

    fn apply_transfer(&self, from: Account, to: Account, amount: Amount) -> bool {
        // NEP-17: negative amounts are invalid
        if amount < 0 {
            return false;
        }
        if lock(&self.rejected_recipients).contains(&to) {
            return false;
        }

        let mut balances = lock(&self.balances);
        let from_balance = balances.get(&from).copied().unwrap_or(0);
        if from_balance < amount {
            return false;
        }
        if amount == 0 || from == to {
            return true;
        }
        balances.insert(from, from_balance - amount);
        *balances.entry(to).or_insert(0) += amount;
        true
    }
}

#[async_trait]
impl FungibleAsset for InMemoryAsset {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn balance_of(&self, account: Account) -> Amount {
        lock(&self.calls).push(AssetCall::BalanceOf(account));
        self.balance(&account)
    }

    async fn transfer(
        &self,
        from: Account,
        to: Account,
        amount: Amount,
        _data: Option<&[u8]>,
    ) -> bool {
        let accepted = self.apply_transfer(from, to, amount);
        lock(&self.calls).push(AssetCall::Transfer {
            from,
            to,
            amount,
            accepted,
        });
        accepted
    }
}
