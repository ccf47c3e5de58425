//! Transfer-with-fee relay
//!
//! Moves a fungible asset from `from` to `to` and collects the fee in the
//! same asset by burning it, in one authorized request.
//!
//! # Request lifecycle
//!
//! ```text
//! INIT → AUTHORIZED → BALANCE_CHECKED → NET_SENT → COMMITTED
//!   ↓                       ↓              ↓
//! DENIED                  FAILED     COMPENSATING → ROLLED_BACK
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Net first**: `net = gross - fee` is fixed before any asset call
//! 2. **Fixed leg order**: net leg, then fee leg
//! 3. **Event iff committed**: exactly one `TransferWithFee` per success
//! 4. **All-or-nothing**: via host transaction or compensation, see
//!    [`crate::config::AtomicityMode`]

pub mod asset;
pub mod error;
pub mod events;
pub mod executor;
pub mod guard;
#[cfg(any(test, feature = "mock-asset"))]
pub mod memory;
pub mod service;
pub mod state;
pub mod types;


pub use asset::{AssetRegistry, FungibleAsset};
pub use error::RelayError;
pub use events::{EventEmitter, EventReceiver, event_channel};
pub use executor::TransferExecutor;
pub use guard::BalanceGuard;
#[cfg(any(test, feature = "mock-asset"))]
pub use memory::{AssetCall, InMemoryAsset};
pub use service::GaslessRelay;
pub use state::RelayState;
pub use types::{RelayId, TransferEvent, TransferOutcome, TransferRequest};
