use rand::rngs::StdRng;
use tracing::debug;

use super::completion::Phase;
use super::engagement::EngagementSets;
use super::error::EngineError;
use super::event::ActionKind;
use super::pool::{ContentListing, ContentPool, ContentRecord, RecordId};
use super::slots::SlotBoard;
use super::time::Tick;

/// Strict state delta. This is the ONLY way session state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    Tick(Tick),
    ActionRecorded { id: RecordId, kind: ActionKind },
    FadeOutStarted { slot: usize },
    SlotSwapped { slot: usize, next: Option<ContentRecord> },
    SlotSettled { slot: usize },
    CompletionArmed,
    Completed,
}

/// One exercise run: the pool, the visible window, the engagement sets and
/// the completion phase. Everything flows through `reduce`; slot-contract
/// violations reduce to logged no-ops since duplicate UI events can legally
/// produce them.
#[derive(Debug)]
pub struct SessionState {
    pub pool: ContentPool,
    pub board: SlotBoard,
    pub engagement: EngagementSets,
    pub phase: Phase,
    // Monotonic version, bumped on every reduction.
    pub version: u64,
    pub last_tick: Tick,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            pool: ContentPool::new(),
            board: SlotBoard::new(),
            engagement: EngagementSets::new(),
            phase: Phase::Active,
            version: 0,
            last_tick: Tick::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the pool (shuffling once) and fill the initial window. The pool
    /// is read-only afterwards; a second load reports `AlreadyLoaded`.
    pub fn load_pool(
        &mut self,
        listings: Vec<ContentListing>,
        max_visible: usize,
        rng: &mut StdRng,
    ) -> Result<usize, EngineError> {
        let count = self.pool.load(listings, rng)?;
        let shown = self.board.initialize(&self.pool, max_visible);
        for id in shown {
            self.engagement.mark_displayed(id);
        }
        self.version += 1;
        Ok(count)
    }

    /// Pure reduction: State + Delta -> Mutated State.
    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::Tick(tick) => {
                self.last_tick = tick;
            }
            StateDelta::ActionRecorded { id, kind } => {
                let counted = match kind {
                    ActionKind::Like => self.engagement.record_like(id),
                    ActionKind::Save => self.engagement.record_save(id),
                };
                if !counted {
                    debug!(record = id, ?kind, "repeat action ignored");
                }
            }
            StateDelta::FadeOutStarted { slot } => {
                if let Err(err) = self.board.begin_replace(slot) {
                    debug!(%err, "slot op dropped");
                }
            }
            StateDelta::SlotSwapped { slot, next } => {
                match self.board.complete_replace(slot, next) {
                    Ok(Some(id)) => self.engagement.mark_displayed(id),
                    Ok(None) => {}
                    Err(err) => debug!(%err, "slot op dropped"),
                }
            }
            StateDelta::SlotSettled { slot } => {
                if let Err(err) = self.board.settle(slot) {
                    debug!(%err, "slot op dropped");
                }
            }
            StateDelta::CompletionArmed => {
                if self.phase == Phase::Active {
                    self.phase = Phase::Completing;
                }
            }
            StateDelta::Completed => {
                if self.phase == Phase::Completing {
                    self.phase = Phase::Complete;
                }
            }
        }
    }

    pub fn like_count(&self) -> u32 {
        self.engagement.like_count()
    }

    pub fn save_count(&self) -> u32 {
        self.engagement.save_count()
    }
}
