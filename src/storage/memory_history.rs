use crate::interfaces::history_store::HistoryStore;
use crate::ledger::history::{PointHistory, TransactionType};
use crate::types::ids::{HistoryId, UserId};
use crate::types::point::Points;
use crate::types::timestamp::Timestamp;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// In-memory history table. Records are grouped per key and kept in
/// insertion order; ids come from one store-wide sequence starting at 1.
pub struct InMemoryHistoryStore {
    histories: DashMap<UserId, Vec<PointHistory>>,
    next_id: AtomicU64,
    latency: Duration,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        InMemoryHistoryStore {
            histories: DashMap::new(),
            next_id: AtomicU64::new(1),
            latency,
        }
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionType,
        timestamp: Timestamp,
    ) -> PointHistory {
        self.simulate_latency();
        let record = PointHistory {
            id: HistoryId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            user_id,
            amount,
            kind,
            timestamp,
        };

        self.histories
            .entry(user_id)
            .or_default()
            .push(record.clone());

        record
    }

    fn list_all(&self, user_id: UserId) -> Vec<PointHistory> {
        self.simulate_latency();
        self.histories
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_has_empty_history() {
        let store = InMemoryHistoryStore::new();
        assert!(store.list_all(UserId(1)).is_empty());
    }

    #[test]
    fn records_are_listed_in_insertion_order_per_key() {
        let store = InMemoryHistoryStore::new();
        let first = store.append(UserId(1), Points::from_i64(1000), TransactionType::Charge, Timestamp::now());
        store.append(UserId(2), Points::from_i64(5), TransactionType::Charge, Timestamp::now());
        let second = store.append(UserId(1), Points::from_i64(400), TransactionType::Use, Timestamp::now());

        let history = store.list_all(UserId(1));
        assert_eq!(history, vec![first.clone(), second.clone()]);
        assert!(first.id < second.id);
        assert_eq!(store.list_all(UserId(2)).len(), 1);
    }
}
