mod pointer;

pub use pointer::{same_pointer, PointerEvent, PointerId, PointerPhase, TouchPoint};
