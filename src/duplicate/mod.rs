//! Directional duplication
//!
//! Copies each selected element next to itself in one of eight directions,
//! pushing overlapping siblings out of the way and growing an enclosing
//! section when the copy crowds its edges. Copies placed into an auto layout
//! are left for the layout to position.

pub mod collision;
pub mod container;
pub mod direction;
pub mod error;
pub mod gap;
pub mod orchestrator;
pub mod outcome;

pub use collision::resolve_collisions;
pub use container::{adapt_container, SECTION_PADDING};
pub use direction::{Direction, DirectionParseError, Horizontal, Vertical};
pub use error::DuplicateError;
pub use gap::{detected_gap, Gap, GapParseError, DEFAULT_GAP, WIDE_ELEMENT_WIDTH, WIDE_GAP};
pub use orchestrator::{duplicate, DuplicateRequest};
pub use outcome::{DuplicateOutcome, Notification, Placement, Severity};
