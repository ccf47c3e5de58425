//! Intent store for replay prevention.
//!
//! Each intent id may be consumed at most once. A request first reserves the
//! id; the reservation becomes permanent on commit or is dropped on abort.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStatus {
    /// A request carrying this intent is in flight
    Reserved,
    /// A request carrying this intent committed. Never reusable.
    Consumed,
}

/// Thread-safe intent id store.
pub struct IntentStore {
    store: DashMap<String, IntentStatus>,
}

impl IntentStore {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Reserve `intent_id` for one request.
    ///
    /// Returns `false` if it is already reserved or consumed (replay).
    pub fn reserve(&self, intent_id: &str) -> bool {
        match self.store.entry(intent_id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(IntentStatus::Reserved);
                true
            }
        }
    }

    /// Mark `intent_id` as consumed
    pub fn commit(&self, intent_id: &str) {
        self.store
            .insert(intent_id.to_string(), IntentStatus::Consumed);
    }

    /// Drop a reservation. Consumed intents stay consumed.
    pub fn release(&self, intent_id: &str) {
        self.store
            .remove_if(intent_id, |_, status| *status == IntentStatus::Reserved);
    }

    pub fn status(&self, intent_id: &str) -> Option<IntentStatus> {
        self.store.get(intent_id).map(|entry| *entry.value())
    }
}

impl Default for IntentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_reserve_once() {
        let store = IntentStore::new();
        assert!(store.reserve("uuid-123"));
        assert!(!store.reserve("uuid-123"));
        assert_eq!(store.status("uuid-123"), Some(IntentStatus::Reserved));
    }

    #[test]
    fn test_release_allows_retry() {
        let store = IntentStore::new();
        assert!(store.reserve("uuid-123"));
        store.release("uuid-123");
        assert_eq!(store.status("uuid-123"), None);
        assert!(store.reserve("uuid-123"));
    }

    #[test]
    fn test_consumed_is_permanent() {
        let store = IntentStore::new();
        assert!(store.reserve("uuid-123"));
        store.commit("uuid-123");
        store.release("uuid-123");
        assert_eq!(store.status("uuid-123"), Some(IntentStatus::Consumed));
        assert!(!store.reserve("uuid-123"));
    }

    #[test]
    fn test_independent_intents() {
        let store = IntentStore::new();
        assert!(store.reserve("a"));
        assert!(store.reserve("b"));
        store.release("a");
        assert_eq!(store.status("a"), None);
        assert_eq!(store.status("b"), Some(IntentStatus::Reserved));
    }

    #[test]
    fn test_concurrent_reserve_single_winner() {
        let store = Arc::new(IntentStore::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for _ in 0..10 {
            let store = Arc::clone(&store);
            let winners = Arc::clone(&winners);
            handles.push(thread::spawn(move || {
                if store.reserve("uuid-race") {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }
}
