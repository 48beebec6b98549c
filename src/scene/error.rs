//! Error types for scene construction and mutation

use thiserror::Error;

use crate::parser::ast::Span;

use super::types::ElementId;

/// Errors raised by scene queries, mutations and cloning
#[derive(Debug, Error)]
pub enum SceneError {
    /// Id does not refer to a slot in the arena
    #[error("unknown element {0}")]
    UnknownElement(ElementId),

    /// Child operation on an element that cannot hold children
    #[error("element {element} cannot contain children")]
    NotAContainer { element: String },

    /// Insertion index past the end of the child list
    #[error("insert index {index} out of range for {element} with {len} children")]
    IndexOutOfRange {
        element: String,
        index: usize,
        len: usize,
    },

    /// Width or height below zero
    #[error("invalid size {width}x{height} for {element}: sizes must be non-negative")]
    NegativeSize {
        element: String,
        width: f64,
        height: f64,
    },

    /// Two declarations share a name
    #[error("duplicate element name '{name}'")]
    DuplicateName { name: String, span: Span },

    /// Modifier with a value of the wrong type
    #[error("invalid value for '{key}' on {element}: {reason}")]
    InvalidModifier {
        element: String,
        key: String,
        reason: String,
        span: Span,
    },
}

impl SceneError {
    /// Create a negative size error
    pub fn negative_size(element: impl Into<String>, width: f64, height: f64) -> Self {
        Self::NegativeSize {
            element: element.into(),
            width,
            height,
        }
    }

    /// Create an invalid modifier error
    pub fn invalid_modifier(
        element: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::InvalidModifier {
            element: element.into(),
            key: key.into(),
            reason: reason.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::DuplicateName { span, .. } => Some(span),
            Self::InvalidModifier { span, .. } => Some(span),
            _ => None,
        }
    }
}
