//! Authorization module.
//!
//! Decides whether a request may act on behalf of its sender.
//!
//! ## Components
//! - `authorizer`: `TransferAuthorizer` trait, `AllowAll`, `SignatureAuthorizer`
//! - `signature`: Ed25519 verification over the canonical intent payload
//! - `intent_store`: one-time intent ids (replay protection)
//! - `error`: Authorization error codes (4001-4005)

pub mod authorizer;
pub mod error;
pub mod intent_store;
pub mod signature;

pub use authorizer::{AllowAll, SignatureAuthorizer, TransferAuthorizer};
pub use error::{AuthError, AuthErrorCode};
pub use intent_store::{IntentStatus, IntentStore};
pub use signature::{IntentSignature, canonical_intent_payload, sign_intent, verify_ed25519};
