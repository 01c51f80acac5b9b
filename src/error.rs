use thiserror::Error;
use crate::types::ids::UserId;
use crate::types::point::Points;

#[derive(Error, Debug)]
pub enum Error {
    // Validation Errors
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount {
        amount: Points,
    },

    #[error("Insufficient balance: requested={requested}, available={available}")]
    InsufficientBalance {
        requested: Points,
        available: Points,
    },

    // Arithmetic Errors
    #[error("Balance overflow: current={current}, amount={amount}")]
    BalanceOverflow {
        current: Points,
        amount: Points,
    },

    #[error("Balance limit exceeded: limit={limit}, attempted={attempted}")]
    BalanceLimitExceeded {
        limit: Points,
        attempted: Points,
    },

    // Reconciliation Errors
    #[error("Reconciliation failed for user {user_id}: expected={expected}, actual={actual}")]
    ReconciliationFailed {
        user_id: UserId,
        expected: Points,
        actual: Points,
    },

    #[error("Invariant violation: {0}")]
    InvariantViolation(InvariantViolation),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Short, stable label used for metrics and error payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::InvalidAmount { .. } => "invalid_amount",
            Error::InsufficientBalance { .. } => "insufficient_balance",
            Error::BalanceOverflow { .. } => "balance_overflow",
            Error::BalanceLimitExceeded { .. } => "balance_limit_exceeded",
            Error::ReconciliationFailed { .. } => "reconciliation_failed",
            Error::InvariantViolation(_) => "invariant_violation",
            Error::ConfigError(_) => "config_error",
            Error::MetricsError(_) => "metrics_error",
            Error::IoError(_) => "io_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub invariant: &'static str,
    pub details: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.details)
    }
}
