use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::interfaces::balance_store::BalanceStore;
use crate::interfaces::history_store::HistoryStore;
use crate::ledger::accounts::UserPoint;
use crate::ledger::history::{PointHistory, TransactionType};
use crate::ledger::lock_registry::KeyLockRegistry;
use crate::observability::metrics::{POINT_CHARGES, POINT_REJECTIONS, POINT_USES};
use crate::observability::tracing::trace_point_mutation;
use crate::storage::{InMemoryBalanceStore, InMemoryHistoryStore};
use crate::types::ids::UserId;
use crate::types::point::Points;
use crate::types::timestamp::Timestamp;

pub type InMemoryPointService = PointService<InMemoryBalanceStore, InMemoryHistoryStore>;

/// Balance and history of one account read under its lock.
#[derive(Clone, Debug)]
pub struct AccountSnapshot {
    pub point: UserPoint,
    pub history: Vec<PointHistory>,
}

/// Charges and spends points.
///
/// Mutations on the same account are serialized through a per-account lock
/// held across read, validate, write and append. Reads go straight to the
/// stores and never wait.
pub struct PointService<B, H> {
    balances: B,
    histories: H,
    locks: KeyLockRegistry<UserId>,
    config: LedgerConfig,
}

impl<B: BalanceStore, H: HistoryStore> PointService<B, H> {
    pub fn new(balances: B, histories: H) -> Self {
        Self::with_config(balances, histories, LedgerConfig::default())
    }

    pub fn with_config(balances: B, histories: H, config: LedgerConfig) -> Self {
        PointService {
            balances,
            histories,
            locks: KeyLockRegistry::new(),
            config,
        }
    }

    pub fn get_point(&self, user_id: UserId) -> UserPoint {
        self.balances.read(user_id)
    }

    pub fn get_histories(&self, user_id: UserId) -> Vec<PointHistory> {
        self.histories.list_all(user_id)
    }

    pub fn charge(&self, user_id: UserId, amount: Points) -> Result<UserPoint> {
        let _span = trace_point_mutation(user_id, TransactionType::Charge, amount).entered();

        let result = Self::validate_amount(amount).and_then(|()| {
            self.locks.with_lock(&user_id, || -> Result<UserPoint> {
                let current = self.balances.read(user_id).point;
                let updated = current
                    .checked_add(amount)
                    .ok_or(Error::BalanceOverflow { current, amount })?;
                self.check_limit(updated)?;

                Ok(self.commit(user_id, updated, amount, TransactionType::Charge))
            })
        });

        Self::record_outcome(TransactionType::Charge, &result);
        result
    }

    pub fn use_points(&self, user_id: UserId, amount: Points) -> Result<UserPoint> {
        let _span = trace_point_mutation(user_id, TransactionType::Use, amount).entered();

        let result = Self::validate_amount(amount).and_then(|()| {
            self.locks.with_lock(&user_id, || -> Result<UserPoint> {
                let current = self.balances.read(user_id).point;
                if current < amount {
                    return Err(Error::InsufficientBalance {
                        requested: amount,
                        available: current,
                    });
                }
                let updated = current
                    .checked_sub(amount)
                    .ok_or(Error::BalanceOverflow { current, amount: -amount })?;

                Ok(self.commit(user_id, updated, amount, TransactionType::Use))
            })
        });

        Self::record_outcome(TransactionType::Use, &result);
        result
    }

    /// Balance and history taken together under the account lock, so no
    /// mutation can land between the two reads.
    pub fn snapshot(&self, user_id: UserId) -> AccountSnapshot {
        self.locks.with_lock(&user_id, || AccountSnapshot {
            point: self.balances.read(user_id),
            history: self.histories.list_all(user_id),
        })
    }

    pub fn balance_store(&self) -> &B {
        &self.balances
    }

    /// Number of accounts that have had a lock created.
    pub fn locked_accounts(&self) -> usize {
        self.locks.len()
    }

    // Caller must hold the lock for `user_id`.
    fn commit(
        &self,
        user_id: UserId,
        updated: Points,
        amount: Points,
        kind: TransactionType,
    ) -> UserPoint {
        let point = self.balances.write(user_id, updated);
        self.histories.append(user_id, amount, kind, Timestamp::now());
        point
    }

    fn validate_amount(amount: Points) -> Result<()> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount { amount });
        }
        Ok(())
    }

    fn check_limit(&self, attempted: Points) -> Result<()> {
        match self.config.max_balance {
            Some(limit) if attempted > limit => {
                Err(Error::BalanceLimitExceeded { limit, attempted })
            }
            _ => Ok(()),
        }
    }

    fn record_outcome(kind: TransactionType, result: &Result<UserPoint>) {
        match result {
            Ok(point) => {
                match kind {
                    TransactionType::Charge => POINT_CHARGES.inc(),
                    TransactionType::Use => POINT_USES.inc(),
                }
                tracing::info!(balance = %point.point, kind = kind.as_str(), "Point mutation committed");
            }
            Err(e) => {
                POINT_REJECTIONS
                    .with_label_values(&[kind.as_str(), e.reason()])
                    .inc();
                tracing::warn!(reason = e.reason(), kind = kind.as_str(), "Point mutation rejected: {}", e);
            }
        }
    }
}
