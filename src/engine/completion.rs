use serde::Serialize;

use super::config::SessionConfig;

/// Session phase. Advances monotonically and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Active,
    Completing,
    Complete,
}

/// Pure threshold evaluation for the completion machine. Runs synchronously
/// after every recorded action, never on a timer; once the session has left
/// Active, later crossings are ignored so the machine cannot re-fire.
#[derive(Debug, Clone, Copy)]
pub struct CompletionGate {
    like_target: u32,
    save_target: u32,
}

impl CompletionGate {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            like_target: config.like_target,
            save_target: config.save_target,
        }
    }

    /// Both thresholds, not either.
    pub fn thresholds_met(&self, likes: u32, saves: u32) -> bool {
        likes >= self.like_target && saves >= self.save_target
    }

    pub fn should_arm(&self, phase: Phase, likes: u32, saves: u32) -> bool {
        phase == Phase::Active && self.thresholds_met(likes, saves)
    }
}
