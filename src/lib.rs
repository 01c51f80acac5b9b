pub mod api;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod invariants;
pub mod ledger;
pub mod observability;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use ledger::{InMemoryPointService, PointService};
