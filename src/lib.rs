pub mod annotation;
pub mod assets;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod state;
pub mod timecode;

pub use annotation::{AnnotationStore, EntryField, EntryId, TimelineEntry};
pub use assets::{AssetId, ImageBlob};
pub use editor::{EditorSession, EntryPreview, GestureOutcome};
pub use error::{AppError, AppResult};
pub use timecode::TimeCode;

/// Entrypoint used by host integrations: installs logging, reads the user
/// config and returns a fresh session.
pub fn start() -> EditorSession {
    logging::init();
    let config = config::load_board_config();
    tracing::info!(
        line_width = config.stroke_style.line_width,
        color = %config.default_color,
        "starting gimmickboard"
    );
    EditorSession::with_config(config)
}
