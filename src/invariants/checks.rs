use crate::error::{Error, InvariantViolation, Result};
use crate::ledger::accounts::UserPoint;
use crate::ledger::history::PointHistory;

pub struct InvariantChecks;

impl InvariantChecks {
    /// Check no negative balance
    pub fn check_no_negative_balance(point: &UserPoint) -> Result<()> {
        if point.point.is_negative() {
            return Err(Error::InvariantViolation(InvariantViolation {
                invariant: "no_negative_balances",
                details: format!(
                    "Account {} has negative balance: {}",
                    point.user_id, point.point
                ),
            }));
        }
        Ok(())
    }

    pub fn check_no_negative_balances(points: &[UserPoint]) -> Result<()> {
        points.iter().try_for_each(Self::check_no_negative_balance)
    }

    /// Records must be positive, and ids and timestamps must not go
    /// backwards within one account's history.
    pub fn check_history_order(history: &[PointHistory]) -> Result<()> {
        if let Some(record) = history.iter().find(|r| !r.amount.is_positive()) {
            return Err(Error::InvariantViolation(InvariantViolation {
                invariant: "positive_history_amounts",
                details: format!("Record {} has non-positive amount {}", record.id, record.amount),
            }));
        }

        for pair in history.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.id <= previous.id || next.timestamp < previous.timestamp {
                return Err(Error::InvariantViolation(InvariantViolation {
                    invariant: "history_order",
                    details: format!(
                        "Record {} is out of order after record {}",
                        next.id, previous.id
                    ),
                }));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::history::TransactionType;
    use crate::types::ids::{HistoryId, UserId};
    use crate::types::point::Points;
    use crate::types::timestamp::Timestamp;

    fn record(id: u64, millis: u64) -> PointHistory {
        PointHistory {
            id: HistoryId(id),
            user_id: UserId(1),
            amount: Points::from_i64(10),
            kind: TransactionType::Charge,
            timestamp: Timestamp::from_millis(millis),
        }
    }

    #[test]
    fn negative_balance_is_a_violation() {
        let point = UserPoint {
            user_id: UserId(1),
            point: Points::from_i64(-1),
            updated_at: Timestamp::ZERO,
        };
        assert!(matches!(
            InvariantChecks::check_no_negative_balance(&point),
            Err(Error::InvariantViolation(_))
        ));
        assert!(InvariantChecks::check_no_negative_balances(&[UserPoint::empty(UserId(2))]).is_ok());
    }

    #[test]
    fn out_of_order_history_is_a_violation() {
        assert!(InvariantChecks::check_history_order(&[record(1, 10), record(2, 10)]).is_ok());
        assert!(InvariantChecks::check_history_order(&[record(2, 10), record(1, 11)]).is_err());
        assert!(InvariantChecks::check_history_order(&[record(1, 11), record(2, 10)]).is_err());
    }
}
