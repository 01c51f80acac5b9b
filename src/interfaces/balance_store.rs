use crate::ledger::accounts::UserPoint;
use crate::types::ids::UserId;
use crate::types::point::Points;

/// Single-key balance storage. Each call is atomic on its own; the store
/// offers no atomicity across calls.
pub trait BalanceStore: Send + Sync {
    /// Current balance, or an empty (zero) balance when the key is unknown.
    fn read(&self, user_id: UserId) -> UserPoint;
    fn write(&self, user_id: UserId, amount: Points) -> UserPoint;
}
