//! Persistent duplicate preferences
//!
//! Settings are read from a TOML file with a single `[duplicate]` table:
//!
//! ```toml
//! [duplicate]
//! gap = 24        # spacing used when auto_gap is off
//! auto_gap = false
//! push = true     # move overlapping siblings out of the way
//! ```
//!
//! Every key is optional. Giving a `gap` without `auto_gap` turns auto
//! detection off.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::duplicate::{Direction, DuplicateRequest, Gap, DEFAULT_GAP};

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid gap {0}: gap must be a non-negative number")]
    InvalidGap(f64),
}

/// User preferences for the duplicate command
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSettings {
    /// Spacing used when `auto_gap` is off
    pub gap: f64,
    /// Derive the gap from each element's width
    pub auto_gap: bool,
    pub push_enabled: bool,
}

/// TOML structure for deserializing settings
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    duplicate: Option<TomlDuplicate>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDuplicate {
    gap: Option<f64>,
    auto_gap: Option<bool>,
    push: Option<bool>,
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            auto_gap: true,
            push_enabled: true,
        }
    }
}

impl DuplicateSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let defaults = Self::default();
        let Some(table) = parsed.duplicate else {
            return Ok(defaults);
        };

        if let Some(gap) = table.gap {
            if !gap.is_finite() || gap < 0.0 {
                return Err(SettingsError::InvalidGap(gap));
            }
        }

        Ok(Self {
            gap: table.gap.unwrap_or(defaults.gap),
            auto_gap: table.auto_gap.unwrap_or(table.gap.is_none()),
            push_enabled: table.push.unwrap_or(defaults.push_enabled),
        })
    }

    /// The gap these settings ask for
    pub fn gap(&self) -> Gap {
        if self.auto_gap {
            Gap::Auto
        } else {
            Gap::Fixed(self.gap)
        }
    }

    /// A request for `direction` using these preferences
    pub fn request(&self, direction: Direction) -> DuplicateRequest {
        DuplicateRequest::new(direction)
            .with_gap(self.gap())
            .with_push(self.push_enabled)
    }
}
