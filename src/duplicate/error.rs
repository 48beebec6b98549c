//! Errors raised while duplicating a selection

use thiserror::Error;

use crate::scene::{ElementId, SceneError};

/// Errors reported by the duplicate command
#[derive(Debug, Error)]
pub enum DuplicateError {
    /// Nothing to duplicate. The scene is left untouched.
    #[error("Select at least one element to duplicate")]
    EmptySelection,

    /// One element of the batch could not be duplicated; the rest continue
    #[error("Failed to duplicate {element}: {source}")]
    ElementOperationFailed {
        id: ElementId,
        element: String,
        #[source]
        source: SceneError,
    },
}
