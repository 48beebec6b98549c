//! Compass directions and the offset rule shared by placement and pushing

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::scene::Rect;

/// Horizontal component of a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Vertical component of a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

/// One of the eight compass directions a duplicate can be placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown direction '{0}' (expected one of: top, bottom, left, right, top-left, top-right, bottom-left, bottom-right)")]
pub struct DirectionParseError(pub String);

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    pub fn horizontal(self) -> Option<Horizontal> {
        match self {
            Direction::Left | Direction::TopLeft | Direction::BottomLeft => Some(Horizontal::Left),
            Direction::Right | Direction::TopRight | Direction::BottomRight => {
                Some(Horizontal::Right)
            }
            Direction::Top | Direction::Bottom => None,
        }
    }

    pub fn vertical(self) -> Option<Vertical> {
        match self {
            Direction::Top | Direction::TopLeft | Direction::TopRight => Some(Vertical::Top),
            Direction::Bottom | Direction::BottomLeft | Direction::BottomRight => {
                Some(Vertical::Bottom)
            }
            Direction::Left | Direction::Right => None,
        }
    }

    /// Whether a copy goes after its original in an auto layout's child order
    pub fn inserts_after(self) -> bool {
        self.horizontal() == Some(Horizontal::Right) || self.vertical() == Some(Vertical::Bottom)
    }

    /// Move `rect` by `shift_x` along the horizontal component and `shift_y`
    /// along the vertical one. A missing component leaves that axis alone.
    pub fn offset(self, rect: Rect, shift_x: f64, shift_y: f64) -> Rect {
        let dx = match self.horizontal() {
            Some(Horizontal::Left) => -shift_x,
            Some(Horizontal::Right) => shift_x,
            None => 0.0,
        };
        let dy = match self.vertical() {
            Some(Vertical::Top) => -shift_y,
            Some(Vertical::Bottom) => shift_y,
            None => 0.0,
        };
        rect.translate(dx, dy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::TopLeft => "top-left",
            Direction::TopRight => "top-right",
            Direction::BottomLeft => "bottom-left",
            Direction::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DirectionParseError;

    /// Accepts `top-left`, `top_left` and `topleft` spellings, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "topleft" => Ok(Direction::TopLeft),
            "topright" => Ok(Direction::TopRight),
            "bottomleft" => Ok(Direction::BottomLeft),
            "bottomright" => Ok(Direction::BottomRight),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}
