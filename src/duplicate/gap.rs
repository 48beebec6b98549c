//! Spacing between an original and its duplicate

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::scene::Element;

/// Gap used for ordinary elements and for an empty selection
pub const DEFAULT_GAP: f64 = 40.0;

/// Gap used for elements wider than [`WIDE_ELEMENT_WIDTH`]
pub const WIDE_GAP: f64 = 100.0;

pub const WIDE_ELEMENT_WIDTH: f64 = 400.0;

/// Gap requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gap {
    /// Derive the gap from each element's size
    #[default]
    Auto,
    /// Use this spacing for every element
    Fixed(f64),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid gap '{0}': expected 'auto' or a non-negative number")]
pub struct GapParseError(pub String);

impl Gap {
    /// Effective gap for one element. An explicit value always wins.
    pub fn resolve(&self, element: &Element) -> f64 {
        match self {
            Gap::Fixed(gap) => *gap,
            Gap::Auto => detected_gap(&[element]),
        }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gap::Auto => f.write_str("auto"),
            Gap::Fixed(gap) => write!(f, "{}", gap),
        }
    }
}

impl FromStr for Gap {
    type Err = GapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Gap::Auto);
        }
        match trimmed.parse::<f64>() {
            Ok(gap) if gap.is_finite() && gap >= 0.0 => Ok(Gap::Fixed(gap)),
            _ => Err(GapParseError(s.to_string())),
        }
    }
}

/// Coarse size-based gap: only the first element's width is inspected.
pub fn detected_gap(elements: &[&Element]) -> f64 {
    match elements.first() {
        Some(first) if first.bounds.width > WIDE_ELEMENT_WIDTH => WIDE_GAP,
        _ => DEFAULT_GAP,
    }
}
