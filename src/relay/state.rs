//! Relay Request State
//!
//! Lifecycle of a single request. Nothing is persisted; the state is tracked
//! for logging and decides whether a failed request consumes its intent.

use std::fmt;

/// Per-request states
///
/// ```text
/// INIT → AUTHORIZED → BALANCE_CHECKED → NET_SENT → COMMITTED
///   ↓         ↓              ↓             ↓
/// DENIED    FAILED         FAILED     COMPENSATING → ROLLED_BACK
/// ```
///
/// Terminal states: COMMITTED, DENIED, FAILED, ROLLED_BACK.
/// A request that ends in NET_SENT (host mode) or COMPENSATING (reversal
/// rejected) left funds at the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayState {
    /// Request received, authorization not yet checked
    Init,

    /// Authorization gate accepted the request
    Authorized,

    /// Sender holds at least the gross amount
    BalanceChecked,

    /// Net leg landed at the recipient - funds are IN-FLIGHT until the fee leg
    NetSent,

    /// Terminal: both legs landed, event emitted
    Committed,

    /// Terminal: authorization gate rejected the request
    Denied,

    /// Terminal: request failed before any funds moved (or host rolls back)
    Failed,

    /// Reversing the net leg
    Compensating,

    /// Terminal: net leg reversed
    RolledBack,
}

impl RelayState {
    /// Check if funds are in-flight (net sent, request not settled)
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RelayState::NetSent | RelayState::Compensating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelayState::Init => "INIT",
            RelayState::Authorized => "AUTHORIZED",
            RelayState::BalanceChecked => "BALANCE_CHECKED",
            RelayState::NetSent => "NET_SENT",
            RelayState::Committed => "COMMITTED",
            RelayState::Denied => "DENIED",
            RelayState::Failed => "FAILED",
            RelayState::Compensating => "COMPENSATING",
            RelayState::RolledBack => "ROLLED_BACK",
        }
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
