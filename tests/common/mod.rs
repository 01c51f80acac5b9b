// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use pointledger::ledger::{InMemoryPointService, PointService};
use pointledger::storage::{InMemoryBalanceStore, InMemoryHistoryStore};
use pointledger::types::point::Points;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// Fresh service over empty in-memory stores
pub fn test_service() -> InMemoryPointService {
    PointService::new(InMemoryBalanceStore::new(), InMemoryHistoryStore::new())
}

/// Service whose stores sleep on every operation, so unsynchronized
/// read-modify-write sequences would interleave
pub fn slow_service(latency_ms: u64) -> InMemoryPointService {
    let latency = Duration::from_millis(latency_ms);
    PointService::new(
        InMemoryBalanceStore::with_latency(latency),
        InMemoryHistoryStore::with_latency(latency),
    )
}

pub fn points(value: i64) -> Points {
    Points::from_i64(value)
}

/// Run `task(i)` on `threads` threads released together by a barrier and
/// collect the results in spawn order.
pub fn run_concurrently<T, F>(threads: usize, task: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let task = Arc::new(task);
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let task = Arc::clone(&task);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                task(i)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|handle| handle.join().expect("worker thread panicked"))
        .collect()
}
