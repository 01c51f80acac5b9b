use crate::types::ids::UserId;
use crate::types::point::Points;
use crate::types::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Current point balance of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPoint {
    pub user_id: UserId,
    pub point: Points,
    pub updated_at: Timestamp,
}

impl UserPoint {
    pub fn new(user_id: UserId, point: Points) -> Self {
        UserPoint {
            user_id,
            point,
            updated_at: Timestamp::now(),
        }
    }

    /// Balance of an account that has never been written.
    pub fn empty(user_id: UserId) -> Self {
        UserPoint {
            user_id,
            point: Points::zero(),
            updated_at: Timestamp::ZERO,
        }
    }
}
