use crate::ledger::history::{PointHistory, TransactionType};
use crate::types::ids::UserId;
use crate::types::point::Points;
use crate::types::timestamp::Timestamp;

/// Append-only, insertion-ordered transaction history per key.
pub trait HistoryStore: Send + Sync {
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionType,
        timestamp: Timestamp,
    ) -> PointHistory;

    /// All records for the key, oldest first.
    fn list_all(&self, user_id: UserId) -> Vec<PointHistory>;
}
