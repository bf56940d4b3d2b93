use super::model::GestureState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Start,
    Move,
    End,
    /// Forced termination, e.g. the stroke collection was cleared mid-gesture.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTransition {
    pub from: GestureState,
    pub event: GestureEvent,
    pub to: GestureState,
}

impl GestureTransition {
    pub const fn new(from: GestureState, event: GestureEvent, to: GestureState) -> Self {
        Self { from, event, to }
    }
}
