use std::collections::HashSet;

use super::pool::RecordId;

/// Session-scoped engagement bookkeeping. Owned here exclusively; the slot
/// board and completion gate read it through the session state, never from
/// module-level globals. All three sets only grow.
#[derive(Debug, Clone, Default)]
pub struct EngagementSets {
    liked: HashSet<RecordId>,
    saved: HashSet<RecordId>,
    displayed: HashSet<RecordId>,
}

impl EngagementSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; re-liking is a no-op. Returns whether the id was new.
    pub fn record_like(&mut self, id: RecordId) -> bool {
        self.liked.insert(id)
    }

    pub fn record_save(&mut self, id: RecordId) -> bool {
        self.saved.insert(id)
    }

    pub fn mark_displayed(&mut self, id: RecordId) {
        self.displayed.insert(id);
    }

    pub fn is_displayed(&self, id: RecordId) -> bool {
        self.displayed.contains(&id)
    }

    pub fn like_count(&self) -> u32 {
        self.liked.len() as u32
    }

    pub fn save_count(&self) -> u32 {
        self.saved.len() as u32
    }

    pub fn displayed(&self) -> &HashSet<RecordId> {
        &self.displayed
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    /// Likes relative to the like target, as a rounded percentage.
    /// Deliberately unclamped: over-engagement reads as a score above 100.
    pub fn polarization_score(&self, like_target: u32) -> u32 {
        if like_target == 0 {
            return 0;
        }
        ((self.like_count() as f64 / like_target as f64) * 100.0).round() as u32
    }
}
