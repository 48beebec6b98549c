//! Result of a duplicate batch and the messages shown for it

use std::fmt;

use crate::scene::ElementId;

use super::direction::Direction;
use super::error::DuplicateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A short user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

impl From<&DuplicateError> for Notification {
    fn from(err: &DuplicateError) -> Self {
        match err {
            DuplicateError::EmptySelection => Notification::warning(err.to_string()),
            DuplicateError::ElementOperationFailed { .. } => Notification::error(err.to_string()),
        }
    }
}

/// How the spacing of a batch was decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// At least one copy went into an auto layout, which spaced it itself
    ContainerManaged,
    /// Copies were positioned explicitly, the last one with this gap.
    /// Reported as "pushed" whether or not siblings were actually moved.
    Pushed { gap: f64 },
}

/// Everything a duplicate batch did
#[derive(Debug)]
pub struct DuplicateOutcome {
    pub direction: Direction,
    pub push_enabled: bool,
    /// Copies in the order they were created
    pub created: Vec<ElementId>,
    /// Per-element failures; the batch continued past each of them
    pub warnings: Vec<DuplicateError>,
    pub container_managed: bool,
    /// Effective gap of the last copy positioned explicitly
    pub last_gap: Option<f64>,
}

impl DuplicateOutcome {
    pub fn new(direction: Direction, push_enabled: bool) -> Self {
        Self {
            direction,
            push_enabled,
            created: Vec::new(),
            warnings: Vec::new(),
            container_managed: false,
            last_gap: None,
        }
    }

    /// `None` when nothing was created
    pub fn placement(&self) -> Option<Placement> {
        if self.created.is_empty() {
            return None;
        }
        if self.container_managed {
            return Some(Placement::ContainerManaged);
        }
        self.last_gap.map(|gap| Placement::Pushed { gap })
    }

    /// The one-line summary of the batch
    pub fn summary(&self) -> Notification {
        let count = self.created.len();
        let noun = if count == 1 { "element" } else { "elements" };
        match self.placement() {
            None => Notification::warning("Nothing was duplicated"),
            Some(Placement::ContainerManaged) => Notification::info(format!(
                "Duplicated {count} {noun} {}: container-managed spacing",
                self.direction
            )),
            Some(Placement::Pushed { gap }) => Notification::info(format!(
                "Duplicated {count} {noun} {}: pushed with gap = {gap}",
                self.direction
            )),
        }
    }

    /// Summary first, then one notification per failed element
    pub fn notifications(&self) -> Vec<Notification> {
        std::iter::once(self.summary())
            .chain(self.warnings.iter().map(Notification::from))
            .collect()
    }
}
