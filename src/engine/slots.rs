use std::collections::HashSet;

use serde::Serialize;

use super::error::EngineError;
use super::pool::{ContentPool, ContentRecord, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionState {
    Idle,
    FadingOut,
    FadingIn,
}

/// A fixed visible position. `index` is the stable render key; only the
/// occupant and transition change over the session.
#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    pub index: usize,
    pub occupant: Option<ContentRecord>,
    pub transition: TransitionState,
}

/// Owns the visible window. Every mutation enforces the per-slot machine
/// `Idle -> FadingOut -> (FadingIn -> Idle) | Idle(empty)`; violations are
/// reported as errors for the reducer to swallow, never panics, since rapid
/// duplicate UI events can legally produce them.
#[derive(Debug, Default)]
pub struct SlotBoard {
    slots: Vec<Slot>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill slots 0..min(max_visible, pool.len()) in pool order. Returns the
    /// ids now on screen so the caller can mark them displayed.
    pub fn initialize(&mut self, pool: &ContentPool, max_visible: usize) -> Vec<RecordId> {
        self.slots = (0..max_visible)
            .map(|index| Slot {
                index,
                occupant: None,
                transition: TransitionState::Idle,
            })
            .collect();

        let mut shown = Vec::new();
        for (slot, record) in self.slots.iter_mut().zip(pool.all().iter()) {
            slot.occupant = Some(record.clone());
            shown.push(record.id);
        }
        shown
    }

    /// Start a replacement cycle. Requires an Idle, occupied slot; returns
    /// the id of the record now fading out.
    pub fn begin_replace(&mut self, index: usize) -> Result<RecordId, EngineError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::InvalidSlotOperation { op: "begin_replace", slot: index })?;

        match (&slot.occupant, slot.transition) {
            (Some(record), TransitionState::Idle) => {
                let id = record.id;
                slot.transition = TransitionState::FadingOut;
                Ok(id)
            }
            _ => Err(EngineError::InvalidSlotOperation { op: "begin_replace", slot: index }),
        }
    }

    /// Swap in the replacement (or vacate). Requires FadingOut. Returns the
    /// id of the record now displayed, if any.
    pub fn complete_replace(
        &mut self,
        index: usize,
        next: Option<ContentRecord>,
    ) -> Result<Option<RecordId>, EngineError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::InvalidSlotOperation { op: "complete_replace", slot: index })?;

        if slot.transition != TransitionState::FadingOut {
            return Err(EngineError::InvalidSlotOperation { op: "complete_replace", slot: index });
        }

        match next {
            Some(record) => {
                let id = record.id;
                slot.occupant = Some(record);
                slot.transition = TransitionState::FadingIn;
                Ok(Some(id))
            }
            None => {
                slot.occupant = None;
                slot.transition = TransitionState::Idle;
                Ok(None)
            }
        }
    }

    /// End of the fade-in window; the slot becomes eligible for actions again.
    pub fn settle(&mut self, index: usize) -> Result<(), EngineError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(EngineError::InvalidSlotOperation { op: "settle", slot: index })?;

        if slot.transition != TransitionState::FadingIn {
            return Err(EngineError::InvalidSlotOperation { op: "settle", slot: index });
        }

        slot.transition = TransitionState::Idle;
        Ok(())
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn occupant(&self, index: usize) -> Option<&ContentRecord> {
        self.slots.get(index).and_then(|s| s.occupant.as_ref())
    }

    pub fn visible_ids(&self) -> HashSet<RecordId> {
        self.slots
            .iter()
            .filter_map(|s| s.occupant.as_ref().map(|r| r.id))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupant.is_some()).count()
    }
}
