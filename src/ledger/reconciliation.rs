use crate::error::{Error, InvariantViolation, Result};
use crate::interfaces::balance_store::BalanceStore;
use crate::interfaces::history_store::HistoryStore;
use crate::invariants::checks::InvariantChecks;
use crate::ledger::history::PointHistory;
use crate::ledger::service::PointService;
use crate::types::ids::UserId;
use crate::types::point::Points;

pub struct Reconciliation;

impl Reconciliation {
    /// Replay records from a zero balance in creation order.
    pub fn replay(history: &[PointHistory]) -> Option<Points> {
        history
            .iter()
            .try_fold(Points::zero(), |balance, record| {
                balance.checked_add(record.signed_amount())
            })
    }

    /// Reconcile account balance with its history
    pub fn reconcile_account<B: BalanceStore, H: HistoryStore>(
        service: &PointService<B, H>,
        user_id: UserId,
    ) -> Result<()> {
        let snapshot = service.snapshot(user_id);
        InvariantChecks::check_no_negative_balance(&snapshot.point)?;
        InvariantChecks::check_history_order(&snapshot.history)?;

        let actual = snapshot.point.point;
        let expected = Self::replay(&snapshot.history).ok_or_else(|| {
            Error::InvariantViolation(InvariantViolation {
                invariant: "history_replay",
                details: format!("History of account {} overflows on replay", user_id),
            })
        })?;

        if actual != expected {
            tracing::error!(user_id = %user_id, %expected, %actual, "Balance does not match history");
            return Err(Error::ReconciliationFailed {
                user_id,
                expected,
                actual,
            });
        }

        Ok(())
    }
}
