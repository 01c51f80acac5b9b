pub mod accounts;
pub mod history;
pub mod lock_registry;
pub mod reconciliation;
pub mod service;

pub use accounts::UserPoint;
pub use history::{PointHistory, TransactionType};
pub use lock_registry::KeyLockRegistry;
pub use reconciliation::Reconciliation;
pub use service::{AccountSnapshot, InMemoryPointService, PointService};
