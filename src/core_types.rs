//! Core types used throughout the relay
//!
//! These are the fundamental value types shared by every module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Amount in the asset's smallest unit (e.g. 10^-8 NEO).
///
/// Signed on purpose: `gross - fee` is computed without clamping, so a fee
/// larger than the gross amount yields a negative net that is handed to the
/// asset contract as-is.
pub type Amount = i64;

/// Length of an account / contract hash in bytes.
pub const ACCOUNT_LEN: usize = 20;

/// Account parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountParseError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Opaque fixed-length address identifying a holder or a contract.
///
/// # Format:
/// - Display: `0x` + 40 lowercase hex chars
/// - Parse: with or without the `0x` prefix, any case
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Account([u8; ACCOUNT_LEN]);

impl Account {
    /// The all-zero account. Nobody holds a key for it.
    pub const ZERO: Account = Account([0u8; ACCOUNT_LEN]);

    #[inline]
    pub const fn from_bytes(bytes: [u8; ACCOUNT_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ACCOUNT_LEN] {
        &self.0
    }

    /// Build a test/demo account whose last byte is `n`.
    pub const fn from_low_u8(n: u8) -> Self {
        let mut bytes = [0u8; ACCOUNT_LEN];
        bytes[ACCOUNT_LEN - 1] = n;
        Self(bytes)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self)
    }
}

impl FromStr for Account {
    type Err = AccountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| AccountParseError::InvalidHex(e.to_string()))?;
        let arr: [u8; ACCOUNT_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AccountParseError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Contract hash of a fungible asset. Same shape as an [`Account`].
pub type AssetHash = Account;
