use serde::{Deserialize, Serialize};
use std::ops::Neg;
use std::fmt;

/// Signed point amount.
///
/// Stored balances are never negative; the sign only shows up in requested
/// amounts (which are rejected when not positive) and in signed replay of the
/// history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    pub const MAX: Points = Points(i64::MAX);

    pub const fn from_i64(value: i64) -> Self {
        Points(value)
    }

    pub fn to_i64(&self) -> i64 {
        self.0
    }

    pub const fn zero() -> Self {
        Points(0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Points) -> Option<Points> {
        self.0.checked_add(other.0).map(Points)
    }

    pub fn checked_sub(self, other: Points) -> Option<Points> {
        self.0.checked_sub(other.0).map(Points)
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points(value)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Points {
    type Output = Points;
    fn neg(self) -> Points {
        Points(-self.0)
    }
}
