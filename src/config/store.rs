use std::time::Duration;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub simulated_latency_ms: u64,  // Sleep per store operation; 0 disables
}

impl StoreConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
