//! Input dispatch
//!
//! Raw key/pointer events arrive asynchronously from the host. They are
//! mapped to logical [`Action`]s and queued; the driver drains the queue at
//! the start of the next tick.

use serde::{Deserialize, Serialize};

use crate::sim::GamePhase;

/// Logical actions the simulation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Set upward velocity; starts the run when Ready
    Flap,
    /// Discard the session and return to Ready
    Reset,
    /// Fresh session, immediately Running
    Play,
    /// Side-panel button: Reset while Running, Play otherwise
    Toggle,
}

/// Physical keys the default mapping cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    ArrowUp,
    Enter,
    KeyR,
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => KeyCode::Space,
            "ArrowUp" => KeyCode::ArrowUp,
            "Enter" | "NumpadEnter" => KeyCode::Enter,
            "KeyR" => KeyCode::KeyR,
            _ => KeyCode::Other,
        }
    }
}

/// A discrete physical input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    Key(KeyCode),
    /// Mouse click, pen or touch press on the playfield
    PointerDown,
}

impl RawInput {
    /// Logical action for this event, given the phase the host last observed
    pub fn to_action(self, phase: GamePhase) -> Option<Action> {
        match self {
            RawInput::Key(KeyCode::Space | KeyCode::ArrowUp) | RawInput::PointerDown => {
                Some(Action::Flap)
            }
            RawInput::Key(KeyCode::KeyR) => Some(Action::Reset),
            RawInput::Key(KeyCode::Enter) if phase == GamePhase::GameOver => Some(Action::Reset),
            RawInput::Key(_) => None,
        }
    }

    /// Whether the host should suppress the browser default (scrolling on
    /// Space/ArrowUp, text selection on press)
    pub fn suppresses_default(self) -> bool {
        matches!(
            self,
            RawInput::Key(KeyCode::Space | KeyCode::ArrowUp) | RawInput::PointerDown
        )
    }
}

/// Actions received since the last tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: Vec<Action>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action. Back-to-back flaps collapse into one since a flap
    /// overwrites velocity rather than adding to it.
    pub fn push(&mut self, action: Action) {
        if action == Action::Flap && self.pending.last() == Some(&Action::Flap) {
            return;
        }
        self.pending.push(action);
    }

    /// Map and queue a raw event. Returns the action queued, if any.
    pub fn dispatch(&mut self, raw: RawInput, phase: GamePhase) -> Option<Action> {
        let action = raw.to_action(phase)?;
        self.push(action);
        Some(action)
    }

    /// Take everything queued so far
    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
