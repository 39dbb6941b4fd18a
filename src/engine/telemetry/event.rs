use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::event::ActionKind;
use crate::engine::time::Tick;

// Allowed: ids, slot indices, ticks, durations, counts, enums.
// Forbidden: labels, media refs, anything content-derived.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    ActionRecorded {
        kind: ActionKind,
        /// False when the set insertion was a repeat (idempotent action).
        counted: bool,
        tick: Tick,
    },

    ReplacementServed {
        slot: usize,
        same_group: bool,
    },

    ReplacementExhausted {
        slot: usize,
    },

    SlotSettled {
        slot: usize,
        tick: Tick,
    },

    CompletionArmed {
        tick: Tick,
    },

    SessionCompleted {
        session_id: Uuid,
        duration_ticks: u64,
        polarization_score: u32,
    },
}
