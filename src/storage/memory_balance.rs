use crate::interfaces::balance_store::BalanceStore;
use crate::ledger::accounts::UserPoint;
use crate::types::ids::UserId;
use crate::types::point::Points;
use dashmap::DashMap;
use std::thread;
use std::time::Duration;

/// In-memory balance table backed by a sharded concurrent map.
///
/// `latency` is slept before every operation; zero in production, non-zero
/// in tests that want read-modify-write races to be likely.
pub struct InMemoryBalanceStore {
    points: DashMap<UserId, UserPoint>,
    latency: Duration,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        InMemoryBalanceStore {
            points: DashMap::new(),
            latency,
        }
    }

    /// Every balance written so far.
    pub fn accounts(&self) -> Vec<UserPoint> {
        self.points.iter().map(|entry| entry.value().clone()).collect()
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

impl Default for InMemoryBalanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn read(&self, user_id: UserId) -> UserPoint {
        self.simulate_latency();
        self.points
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| UserPoint::empty(user_id))
    }

    fn write(&self, user_id: UserId, amount: Points) -> UserPoint {
        self.simulate_latency();
        let point = UserPoint::new(user_id, amount);
        self.points.insert(user_id, point.clone());
        point
    }
}
