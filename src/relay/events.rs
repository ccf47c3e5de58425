//! Transfer Event Channel
//!
//! Append-only output channel for `TransferWithFee` events.
//! The relay only appends; transport and consumption belong to the observer.

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::types::TransferEvent;

/// Sender side (held by the relay)
#[derive(Clone)]
pub struct EventEmitter {
    tx: mpsc::UnboundedSender<TransferEvent>,
}

impl EventEmitter {
    /// Publish one event. Never fails the caller.
    ///
    /// If the observer side is gone the event survives only in the log.
    pub fn emit(&self, event: TransferEvent) {
        info!(
            target: "relay::event",
            event = TransferEvent::NAME,
            from = %event.from,
            to = %event.to,
            asset = %event.asset,
            net_amount = event.net_amount,
            fee_in_asset = event.fee_in_asset,
            intent_id = %event.intent_id,
            "Event emitted"
        );

        if let Err(e) = self.tx.send(event) {
            warn!(intent_id = %e.0.intent_id, "Event observer dropped, event not queued");
        }
    }
}

/// Receiver side (held by the off-chain observer)
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<TransferEvent>,
}

impl EventReceiver {
    /// Non-blocking receive
    pub fn try_recv(&mut self) -> Option<TransferEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event, `None` once every emitter is dropped
    pub async fn recv(&mut self) -> Option<TransferEvent> {
        self.rx.recv().await
    }

    /// Take everything queued right now
    pub fn drain(&mut self) -> Vec<TransferEvent> {
        let mut out = Vec::new();
        while let Some(ev) = self.try_recv() {
            out.push(ev);
        }
        out
    }
}

/// Create a new event channel pair
pub fn event_channel() -> (EventEmitter, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventEmitter { tx }, EventReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Account;

    fn sample() -> TransferEvent {
        TransferEvent {
            from: Account::from_low_u8(1),
            to: Account::from_low_u8(2),
            asset: Account::from_low_u8(9),
            net_amount: 95,
            fee_in_asset: 5,
            intent_id: "uuid-123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_emit_then_recv() {
        let (emitter, mut receiver) = event_channel();
        emitter.emit(sample());

        let ev = receiver.recv().await.unwrap();
        assert_eq!(ev, sample());
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn test_drain_keeps_order() {
        let (emitter, mut receiver) = event_channel();
        let mut second = sample();
        second.intent_id = "uuid-456".to_string();

        emitter.emit(sample());
        emitter.emit(second.clone());

        assert_eq!(receiver.drain(), vec![sample(), second]);
    }

    #[test]
    fn test_emit_without_observer_does_not_panic() {
        let (emitter, receiver) = event_channel();
        drop(receiver);
        emitter.emit(sample());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["net_amount"], 95);
        assert_eq!(json["fee_in_asset"], 5);
        assert_eq!(json["intent_id"], "uuid-123");
        assert_eq!(json["from"], "0x0000000000000000000000000000000000000001");
    }
}
