//! Ed25519 intent signatures.
//!
//! The sender signs the canonical intent payload off-chain; the relay only
//! ever sees public keys.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use super::error::{AuthError, AuthErrorCode};
use crate::relay::types::TransferRequest;

/// Ed25519 signature length in bytes
pub const SIGNATURE_LEN: usize = 64;

/// Ed25519 public key length in bytes
pub const PUBLIC_KEY_LEN: usize = 32;

/// Sender's signature over the canonical intent payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentSignature([u8; SIGNATURE_LEN]);

impl IntentSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            AuthError::new(
                AuthErrorCode::InvalidFormat,
                format!("signature must be {SIGNATURE_LEN} bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Self(arr))
    }

    /// Parse a hex signature, `0x` prefix optional
    pub fn from_hex(s: &str) -> Result<Self, AuthError> {
        let digits = s.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits)
            .map_err(|e| AuthError::new(AuthErrorCode::InvalidFormat, e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Canonical message the sender signs.
///
/// Compact JSON, keys sorted:
/// `{"asset":..,"fee_in_asset":..,"from":..,"gross_amount":..,"intent_id":..,"to":..}`
///
/// Every request field is bound, so changing any of them (in particular
/// the amounts or the intent id) invalidates the signature.
pub fn canonical_intent_payload(req: &TransferRequest) -> String {
    // serde_json::Map is a BTreeMap: keys come out sorted
    serde_json::json!({
        "asset": req.asset.to_string(),
        "fee_in_asset": req.fee_in_asset,
        "from": req.from.to_string(),
        "gross_amount": req.gross_amount,
        "intent_id": req.intent_id,
        "to": req.to.to_string(),
    })
    .to_string()
}

/// Verify an Ed25519 signature.
///
/// Returns `false` on malformed key or signature bytes.
pub fn verify_ed25519(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let pk_bytes: [u8; PUBLIC_KEY_LEN] = match public_key.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };

    let sig_bytes: [u8; SIGNATURE_LEN] = match signature.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };

    let verifying_key = match VerifyingKey::from_bytes(&pk_bytes) {
        Ok(k) => k,
        Err(_) => return false,
    };

    let sig = Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &sig).is_ok()
}

/// Sign the canonical payload of `req`.
///
/// Used by whoever holds the sender's key; the relay itself never signs.
pub fn sign_intent(signing_key: &SigningKey, req: &TransferRequest) -> IntentSignature {
    let payload = canonical_intent_payload(req);
    IntentSignature(signing_key.sign(payload.as_bytes()).to_bytes())
}

/// Generate a new Ed25519 keypair for testing.
///
/// Returns (signing_key, public_key_bytes).
#[cfg(test)]
pub fn generate_keypair() -> (SigningKey, [u8; PUBLIC_KEY_LEN]) {
    use rand::rngs::OsRng;

    let signing_key = SigningKey::generate(&mut OsRng);
    let public_key = signing_key.verifying_key().to_bytes();
    (signing_key, public_key)
}
