mod palette;
mod pen;
mod recorder;

pub use crate::geometry::{Color, ImagePoint};
pub use palette::{PaletteColor, DEFAULT_DRAW_COLOR, PALETTE};
pub use pen::{Stroke, StrokeStyle, DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH, MIN_LINE_WIDTH};
pub use recorder::{GestureOutcome, StrokeHandle, StrokeRecorder};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("no stroke is being recorded")]
    NoActiveStroke,
    #[error("stroke {} of {} no longer exists", .0.index, .0.asset_id)]
    StrokeNotFound(StrokeHandle),
    #[error("stroke {} of {} is already finished", .0.index, .0.asset_id)]
    StrokeFinalized(StrokeHandle),
}
