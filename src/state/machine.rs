use super::error::{StateError, StateResult};
use super::{GestureEvent, GestureState, GestureTransition};

#[derive(Debug, Default)]
pub struct GestureMachine {
    state: GestureState,
    last_transition: Option<GestureTransition>,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn last_transition(&self) -> Option<GestureTransition> {
        self.last_transition
    }

    pub fn can_transition(&self, event: GestureEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: GestureEvent) -> Option<GestureState> {
        use GestureEvent::*;
        match (self.state, event) {
            (GestureState::Idle, Start) => Some(GestureState::Drawing),
            (GestureState::Drawing, Move) => Some(GestureState::Drawing),
            (GestureState::Drawing, End) => Some(GestureState::Idle),
            (GestureState::Idle, End) => Some(GestureState::Idle),
            (_, Cancel) => Some(GestureState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: GestureEvent) -> StateResult<GestureState> {
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::debug!(from = ?from, event = ?event, "gesture event rejected");
            StateError::InvalidGestureTransition { from, event }
        })?;

        if next != self.state {
            tracing::debug!(from = ?self.state, event = ?event, to = ?next, "gesture transition");
        }
        self.last_transition = Some(GestureTransition::new(self.state, event, next));
        self.state = next;

        Ok(self.state)
    }
}

impl std::fmt::Display for GestureMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GestureState::{:?}", self.state)
    }
}
