//! Gasless Relay - transfer a fungible asset, pay the fee in the same asset
//!
//! The relay deducts a fee denominated in the asset being transferred, sends
//! the net amount to the recipient and burns the fee, in one authorized
//! request. The sender never needs to hold a separate network fee token.
//!
//! # Modules
//!
//! - [`core_types`] - Account / amount types
//! - [`auth`] - Authorization gate (fail-open placeholder, Ed25519 intents)
//! - [`relay`] - Balance guard, two-leg executor, event channel, entry points
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

// Core types - must be first!
pub mod core_types;

pub mod auth;
pub mod config;
pub mod logging;
pub mod relay;

// Convenient re-exports at crate root
pub use auth::{AllowAll, AuthError, IntentSignature, SignatureAuthorizer, TransferAuthorizer};
pub use config::{AtomicityMode, AuthMode, RelayConfig};
pub use core_types::{Account, Amount, AssetHash};
pub use relay::{
    AssetRegistry, EventReceiver, FungibleAsset, GaslessRelay, RelayError, TransferEvent,
    TransferOutcome, TransferRequest, event_channel,
};
