use crate::annotation::AnnotationError;
use crate::assets::AssetError;
use crate::canvas::CompositeError;
use crate::editor::ToolError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Composite(#[from] CompositeError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::EntryId;

    #[test]
    fn module_errors_convert_with_question_mark() {
        fn missing() -> crate::annotation::AnnotationResult<()> {
            Err(AnnotationError::EntryNotFound(EntryId::from_raw(4)))
        }
        fn lookup() -> AppResult<()> {
            missing()?;
            Ok(())
        }

        let err = lookup().unwrap_err();
        assert!(matches!(err, AppError::Annotation(_)));
        assert_eq!(err.to_string(), "timeline entry entry_4 does not exist");
    }

    #[test]
    fn tool_errors_keep_their_message() {
        let err = AppError::from(ToolError::NoActiveStroke);
        assert_eq!(err.to_string(), "no stroke is being recorded");
    }
}
