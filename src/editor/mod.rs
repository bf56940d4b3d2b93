//! Drawing tools and the session controller the host drives.

mod session;
pub mod tools;

pub use session::{EditorSession, EntryPreview};
pub use tools::{GestureOutcome, Stroke, StrokeRecorder, StrokeStyle, ToolError};
