use serde::{Deserialize, Serialize};
use crate::types::point::Points;

pub mod loader;
pub mod logging;
pub mod server;
pub mod store;

pub use loader::AppConfig;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound on any account balance. `None` leaves only the i64 range.
    pub max_balance: Option<Points>,
}
