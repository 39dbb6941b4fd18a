use thiserror::Error;

/// Engine-internal condition taxonomy. None of these are fatal: the reactor
/// logs and continues, and nothing here ever surfaces to the learner. The
/// only user-visible degradation is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("content pool already loaded")]
    AlreadyLoaded,

    #[error("no replacement available for slot {slot}")]
    NoReplacementAvailable { slot: usize },

    #[error("invalid slot operation: {op} on slot {slot}")]
    InvalidSlotOperation { op: &'static str, slot: usize },
}
