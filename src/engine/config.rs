use serde::{Deserialize, Serialize};

use super::time::ticks_for_ms;

/// Session constants for one exercise run. Defaults match the canonical
/// module variant (11 visible slots, 8 likes / 4 saves to complete).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub module_id: String,
    pub max_visible: usize,
    pub like_target: u32,
    pub save_target: u32,
    pub fade_out_ms: u64,
    pub fade_in_ms: u64,
    pub completion_settle_ms: u64,
    /// Fixed seed makes the shuffle and tie-breaking reproducible in tests.
    /// None seeds from entropy.
    pub shuffle_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            module_id: "M1".to_string(),
            max_visible: 11,
            like_target: 8,
            save_target: 4,
            fade_out_ms: 300,
            fade_in_ms: 300,
            completion_settle_ms: 500,
            shuffle_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn fade_out_ticks(&self) -> u64 {
        ticks_for_ms(self.fade_out_ms)
    }

    pub fn fade_in_ticks(&self) -> u64 {
        ticks_for_ms(self.fade_in_ms)
    }

    pub fn completion_settle_ticks(&self) -> u64 {
        ticks_for_ms(self.completion_settle_ms)
    }
}
