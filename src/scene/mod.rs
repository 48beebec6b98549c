//! Scene tree the duplication engine operates on
//!
//! Plays the role of the host document: an arena of positioned elements with
//! parent/child links, cloning, geometry mutation and the auto layout rule.

mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod tree;
pub mod types;

pub use config::SceneConfig;
pub use error::SceneError;
pub use format::format_scene;
pub use tree::{InsertPosition, Scene};
pub use types::*;
