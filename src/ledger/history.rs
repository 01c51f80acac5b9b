use serde::{Deserialize, Serialize};
use crate::types::ids::{HistoryId, UserId};
use crate::types::point::Points;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointHistory {
    pub id: HistoryId,
    pub user_id: UserId,
    pub amount: Points,  // Always positive; direction comes from `kind`
    pub kind: TransactionType,
    pub timestamp: Timestamp,
}

impl PointHistory {
    /// Amount with the sign of its effect on the balance.
    pub fn signed_amount(&self) -> Points {
        match self.kind {
            TransactionType::Charge => self.amount,
            TransactionType::Use => -self.amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Charge,
    Use,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Charge => "charge",
            TransactionType::Use => "use",
        }
    }
}
