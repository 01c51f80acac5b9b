pub mod memory_balance;
pub mod memory_history;

pub use memory_balance::InMemoryBalanceStore;
pub use memory_history::InMemoryHistoryStore;
