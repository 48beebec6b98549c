//! SVG preview of a scene
//!
//! Containers become nested `<g>` groups translated to their position, so the
//! output mirrors the scene's parent-relative coordinates.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_highlighting};
