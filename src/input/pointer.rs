use crate::geometry::ClientPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// Identifies the physical pointer behind an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub identifier: u64,
    pub position: ClientPoint,
}

impl TouchPoint {
    pub const fn new(identifier: u64, x: f64, y: f64) -> Self {
        Self {
            identifier,
            position: ClientPoint::new(x, y),
        }
    }
}

/// A single-pointer input sample in client space.
///
/// `pointer` is `None` when the host cannot tell which pointer produced the
/// event; such events match whatever gesture is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer: Option<PointerId>,
    pub position: Option<ClientPoint>,
}

impl PointerEvent {
    pub const fn new(
        phase: PointerPhase,
        pointer: Option<PointerId>,
        position: Option<ClientPoint>,
    ) -> Self {
        Self {
            phase,
            pointer,
            position,
        }
    }

    pub const fn mouse_down(x: f64, y: f64) -> Self {
        Self::new(
            PointerPhase::Start,
            Some(PointerId::Mouse),
            Some(ClientPoint::new(x, y)),
        )
    }

    pub const fn mouse_move(x: f64, y: f64) -> Self {
        Self::new(
            PointerPhase::Move,
            Some(PointerId::Mouse),
            Some(ClientPoint::new(x, y)),
        )
    }

    pub const fn mouse_up() -> Self {
        Self::new(PointerPhase::End, Some(PointerId::Mouse), None)
    }

    /// Leaving the surface ends the gesture the same way releasing does.
    pub const fn mouse_leave() -> Self {
        Self::mouse_up()
    }

    /// Start or move from the current touch list. Only the first (primary)
    /// touch is used; further fingers are ignored.
    ///
    /// Ends are not derived from the current list, since it no longer holds
    /// the lifted finger. Use [`PointerEvent::touch_ends`] instead.
    pub fn from_touches(phase: PointerPhase, touches: &[TouchPoint]) -> Option<Self> {
        if phase == PointerPhase::End {
            return None;
        }
        let primary = touches.first()?;
        Some(Self::new(
            phase,
            Some(PointerId::Touch(primary.identifier)),
            Some(primary.position),
        ))
    }

    /// End events for a touch-end: one per lifted (`changed`) touch, plus an
    /// untagged end when no touch `remaining` is down, so a gesture never
    /// outlives the last finger.
    pub fn touch_ends(changed: &[TouchPoint], remaining: &[TouchPoint]) -> Vec<Self> {
        let mut events: Vec<Self> = changed
            .iter()
            .map(|touch| Self::touch_end(Some(touch.identifier)))
            .collect();
        if remaining.is_empty() {
            events.push(Self::touch_end(None));
        }
        events
    }

    pub const fn touch_end(identifier: Option<u64>) -> Self {
        let pointer = match identifier {
            Some(id) => Some(PointerId::Touch(id)),
            None => None,
        };
        Self::new(PointerPhase::End, pointer, None)
    }

    /// Whether this event belongs to the gesture driven by `active`.
    pub fn belongs_to(&self, active: Option<PointerId>) -> bool {
        same_pointer(self.pointer, active)
    }
}

/// Unknown tokens on either side match, so hosts without pointer ids still work.
pub fn same_pointer(event: Option<PointerId>, active: Option<PointerId>) -> bool {
    match (event, active) {
        (Some(event), Some(active)) => event == active,
        _ => true,
    }
}
