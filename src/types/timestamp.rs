use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use serde::{Deserialize, Serialize};

const LOGICAL_BITS: u32 = 20;
const LOGICAL_MASK: u64 = (1 << LOGICAL_BITS) - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub physical: u64,  // Milliseconds since epoch
    pub logical: u64,   // Monotonic counter within the same millisecond
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { physical: 0, logical: 0 };

    pub fn now() -> Self {
        HLC.now()
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp {
            physical: millis,
            logical: 0,
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.physical
    }

    fn pack(&self) -> u64 {
        (self.physical << LOGICAL_BITS) | (self.logical & LOGICAL_MASK)
    }

    fn unpack(packed: u64) -> Self {
        Timestamp {
            physical: packed >> LOGICAL_BITS,
            logical: packed & LOGICAL_MASK,
        }
    }
}

/// Hybrid logical clock: wall-clock milliseconds plus a logical counter,
/// packed into one atomic so every call returns a strictly greater value.
pub struct HybridLogicalClock {
    last: AtomicU64,
}

impl HybridLogicalClock {
    pub fn new() -> Self {
        HybridLogicalClock {
            last: AtomicU64::new(0),
        }
    }

    pub fn now(&self) -> Timestamp {
        let wall_clock = Timestamp::from_millis(current_timestamp_ms()).pack();

        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(Self::advance(last, wall_clock))
            })
            // The closure never returns None
            .unwrap_or_else(|last| last);

        Timestamp::unpack(Self::advance(previous, wall_clock))
    }

    fn advance(last: u64, wall_clock: u64) -> u64 {
        if wall_clock > last {
            // Wall clock advanced
            wall_clock
        } else {
            // Same millisecond or clock went backward; a full logical counter
            // carries into the physical part
            last + 1
        }
    }
}

impl Default for HybridLogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Current timestamp in milliseconds since epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

lazy_static::lazy_static! {
    static ref HLC: HybridLogicalClock = HybridLogicalClock::new();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn clock_is_strictly_increasing() {
        let clock = HybridLogicalClock::new();
        let mut previous = clock.now();
        for _ in 0..10_000 {
            let next = clock.now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn clock_never_repeats_across_threads() {
        let clock = Arc::new(HybridLogicalClock::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || (0..1_000).map(|_| clock.now()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<Timestamp> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn pack_round_trips_physical_and_logical() {
        let ts = Timestamp { physical: 1_700_000_000_000, logical: 42 };
        assert_eq!(Timestamp::unpack(ts.pack()), ts);
    }
}
