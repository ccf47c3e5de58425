//! Authorization Gate
//!
//! Decides whether a request may move funds on behalf of `from`.
//! Per request: `Unchecked → {Authorized, Denied}`.

use dashmap::DashMap;

use super::error::{AuthError, AuthErrorCode};
use super::intent_store::{IntentStatus, IntentStore};
use super::signature::{IntentSignature, PUBLIC_KEY_LEN, canonical_intent_payload, verify_ed25519};
use crate::core_types::Account;
use crate::relay::types::TransferRequest;

/// Pluggable verifier
///
/// Implementations are interchangeable without touching the executor.
pub trait TransferAuthorizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Host-level witness check. Receives nothing request-specific, so it
    /// cannot bind to `from` or `intent_id`.
    fn verify_witness(&self) -> bool;

    /// Per-request decision. `Ok(())` = Authorized.
    fn authorize(
        &self,
        req: &TransferRequest,
        proof: Option<&IntentSignature>,
    ) -> Result<(), AuthError>;

    /// Request committed, or failed with the net leg in place: its
    /// authorization is spent.
    fn on_committed(&self, _req: &TransferRequest) {}

    /// Request aborted without durable effect: authorization may be reused.
    fn on_aborted(&self, _req: &TransferRequest) {}
}

/// Always authorizes. Ignores the proof.
///
/// FAIL-OPEN: anyone can move anyone's funds through the relay. Matches the
/// placeholder behavior of the deployed contract; do not use where the
/// relay is reachable by untrusted callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl TransferAuthorizer for AllowAll {
    fn name(&self) -> &'static str {
        "allow_all"
    }

    fn verify_witness(&self) -> bool {
        true
    }

    fn authorize(
        &self,
        _req: &TransferRequest,
        _proof: Option<&IntentSignature>,
    ) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Ed25519 signature over the canonical intent payload + one-time intent ids.
#[derive(Default)]
pub struct SignatureAuthorizer {
    keys: DashMap<Account, [u8; PUBLIC_KEY_LEN]>,
    intents: IntentStore,
}

impl SignatureAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `public_key` to `account`
    pub fn register(&self, account: Account, public_key: &[u8]) -> Result<(), AuthError> {
        let pk: [u8; PUBLIC_KEY_LEN] = public_key.try_into().map_err(|_| {
            AuthError::new(
                AuthErrorCode::InvalidFormat,
                format!(
                    "public key must be {PUBLIC_KEY_LEN} bytes, got {}",
                    public_key.len()
                ),
            )
        })?;
        if ed25519_dalek::VerifyingKey::from_bytes(&pk).is_err() {
            return Err(AuthError::new(
                AuthErrorCode::InvalidFormat,
                "not a valid Ed25519 public key",
            ));
        }
        self.keys.insert(account, pk);
        Ok(())
    }

    pub fn unregister(&self, account: &Account) -> bool {
        self.keys.remove(account).is_some()
    }

    pub fn intent_status(&self, intent_id: &str) -> Option<IntentStatus> {
        self.intents.status(intent_id)
    }
}

impl TransferAuthorizer for SignatureAuthorizer {
    fn name(&self) -> &'static str {
        "ed25519"
    }

    /// Binding happens in `authorize`; the witness itself carries nothing
    /// to check.
    fn verify_witness(&self) -> bool {
        true
    }

    fn authorize(
        &self,
        req: &TransferRequest,
        proof: Option<&IntentSignature>,
    ) -> Result<(), AuthError> {
        let sig = proof.ok_or_else(|| AuthError::from_code(AuthErrorCode::MissingProof))?;

        let public_key = self
            .keys
            .get(&req.from)
            .map(|entry| *entry.value())
            .ok_or_else(|| AuthError::from_code(AuthErrorCode::UnknownSigner))?;

        let payload = canonical_intent_payload(req);
        if !verify_ed25519(&public_key, payload.as_bytes(), sig.as_bytes()) {
            return Err(AuthError::from_code(AuthErrorCode::InvalidSignature));
        }

        // Only after the signature checks out, so a forged request cannot
        // burn someone else's intent id.
        if !self.intents.reserve(&req.intent_id) {
            return Err(AuthError::from_code(AuthErrorCode::IntentReplayed));
        }
        Ok(())
    }

    fn on_committed(&self, req: &TransferRequest) {
        self.intents.commit(&req.intent_id);
    }

    fn on_aborted(&self, req: &TransferRequest) {
        self.intents.release(&req.intent_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::signature::{generate_keypair, sign_intent};

    const ALICE: Account = Account::from_low_u8(1);
    const BOB: Account = Account::from_low_u8(2);

    fn request(intent_id: &str) -> TransferRequest {
        TransferRequest::new(ALICE, BOB, Account::from_low_u8(0xee), 100, 5, intent_id)
    }

    #[test]
    fn test_allow_all_ignores_proof() {
        let auth = AllowAll;
        assert!(auth.verify_witness());
        assert!(auth.authorize(&request("x"), None).is_ok());
        assert!(auth.authorize(&request("x"), None).is_ok());
    }

    #[test]
    fn test_signature_happy_path() {
        let (key, public_key) = generate_keypair();
        let auth = SignatureAuthorizer::new();
        auth.register(ALICE, &public_key).unwrap();

        let req = request("uuid-1");
        let sig = sign_intent(&key, &req);
        assert!(auth.authorize(&req, Some(&sig)).is_ok());
        assert_eq!(auth.intent_status("uuid-1"), Some(IntentStatus::Reserved));

        auth.on_committed(&req);
        assert_eq!(auth.intent_status("uuid-1"), Some(IntentStatus::Consumed));
    }

    #[test]
    fn test_missing_proof() {
        let auth = SignatureAuthorizer::new();
        let err = auth.authorize(&request("uuid-1"), None).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::MissingProof);
    }

    #[test]
    fn test_unknown_signer() {
        let (key, _) = generate_keypair();
        let auth = SignatureAuthorizer::new();
        let req = request("uuid-1");
        let sig = sign_intent(&key, &req);

        let err = auth.authorize(&req, Some(&sig)).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::UnknownSigner);
    }

    #[test]
    fn test_signature_by_other_key_denied() {
        let (_, public_key) = generate_keypair();
        let (mallory, _) = generate_keypair();
        let auth = SignatureAuthorizer::new();
        auth.register(ALICE, &public_key).unwrap();

        let req = request("uuid-1");
        let sig = sign_intent(&mallory, &req);
        let err = auth.authorize(&req, Some(&sig)).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidSignature);
        // forged request does not burn the intent
        assert_eq!(auth.intent_status("uuid-1"), None);
    }

    #[test]
    fn test_replay_denied() {
        let (key, public_key) = generate_keypair();
        let auth = SignatureAuthorizer::new();
        auth.register(ALICE, &public_key).unwrap();

        let req = request("uuid-1");
        let sig = sign_intent(&key, &req);
        auth.authorize(&req, Some(&sig)).unwrap();
        auth.on_committed(&req);

        let err = auth.authorize(&req, Some(&sig)).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::IntentReplayed);
    }

    #[test]
    fn test_aborted_request_releases_intent() {
        let (key, public_key) = generate_keypair();
        let auth = SignatureAuthorizer::new();
        auth.register(ALICE, &public_key).unwrap();

        let req = request("uuid-1");
        let sig = sign_intent(&key, &req);
        auth.authorize(&req, Some(&sig)).unwrap();
        auth.on_aborted(&req);

        assert!(auth.authorize(&req, Some(&sig)).is_ok());
    }

    #[test]
    fn test_register_rejects_bad_key() {
        let auth = SignatureAuthorizer::new();
        let err = auth.register(ALICE, &[1u8; 16]).unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidFormat);
        assert!(!auth.unregister(&ALICE));
    }
}
