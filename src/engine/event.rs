use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum Event {
    /// External signals (user actions from the UI collaborator).
    Input(InputEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Like,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAction {
    pub slot_index: usize,
    pub kind: ActionKind,
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub content: InputContent,
}

#[derive(Debug, Clone)]
pub enum InputContent {
    Action(UserAction),
}

impl InputEvent {
    pub fn like(source: &str, slot_index: usize) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Action(UserAction {
                slot_index,
                kind: ActionKind::Like,
            }),
        }
    }

    pub fn save(source: &str, slot_index: usize) -> Self {
        Self {
            source: source.to_string(),
            content: InputContent::Action(UserAction {
                slot_index,
                kind: ActionKind::Save,
            }),
        }
    }
}
