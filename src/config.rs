//! # Render Configuration
//!
//! Toggles and scalars the overlay reads at the start of every render pass.
//!
//! ## YAML Format
//! Every key is optional; missing keys keep their default.
//! ```yaml
//! filled: true
//! outline: true
//! alpha-filled: 26
//! alpha-outline: 26
//! thickness: 2.0
//! text-scale: 1.0
//! debug: false
//! ```
//!
//! ## Ranges
//! - `alpha-filled`, `alpha-outline`: 0..=255
//! - `thickness`: 0.25..=4.0
//! - `text-scale`: 0.0..=4.0
//!
//! Out-of-range values are rejected with [`NoteEspError::Config`], not clamped.

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::NoteEspError;

pub const THICKNESS_RANGE: RangeInclusive<f32> = 0.25..=4.0;
pub const TEXT_SCALE_RANGE: RangeInclusive<f32> = 0.0..=4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Draw box surfaces.
    pub filled: bool,
    /// Draw box outlines.
    pub outline: bool,
    pub alpha_filled: u8,
    pub alpha_outline: u8,
    /// Outline line width.
    pub thickness: f32,
    pub text_scale: f32,
    /// Send a message for every classified sound.
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            filled: true,
            outline: true,
            alpha_filled: 26,
            alpha_outline: 26,
            thickness: 2.0,
            text_scale: 1.0,
            debug: false,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRenderConfig {
    filled: Option<bool>,
    outline: Option<bool>,
    alpha_filled: Option<i64>,
    alpha_outline: Option<i64>,
    thickness: Option<f32>,
    text_scale: Option<f32>,
    debug: Option<bool>,
}

impl RenderConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    ///
    /// # Examples
    /// ```
    /// use noteesp::RenderConfig;
    ///
    /// let config = RenderConfig::from_yaml("outline: false\ntext-scale: 2.5")?;
    /// assert!(!config.outline);
    /// assert_eq!(config.text_scale, 2.5);
    /// assert_eq!(config.alpha_filled, 26);
    /// # Ok::<(), noteesp::NoteEspError>(())
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, NoteEspError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawRenderConfig =
            serde_yaml::from_str(content).map_err(|e| NoteEspError::Config(e.to_string()))?;

        let defaults = Self::default();
        let config = Self {
            filled: raw.filled.unwrap_or(defaults.filled),
            outline: raw.outline.unwrap_or(defaults.outline),
            alpha_filled: match raw.alpha_filled {
                Some(a) => parse_alpha("alpha-filled", a)?,
                None => defaults.alpha_filled,
            },
            alpha_outline: match raw.alpha_outline {
                Some(a) => parse_alpha("alpha-outline", a)?,
                None => defaults.alpha_outline,
            },
            thickness: raw.thickness.unwrap_or(defaults.thickness),
            text_scale: raw.text_scale.unwrap_or(defaults.text_scale),
            debug: raw.debug.unwrap_or(defaults.debug),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NoteEspError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check the float scalars are inside their ranges.
    pub fn validate(&self) -> Result<(), NoteEspError> {
        check_range("thickness", self.thickness, &THICKNESS_RANGE)?;
        check_range("text-scale", self.text_scale, &TEXT_SCALE_RANGE)?;
        Ok(())
    }

    /// Fill alpha actually submitted: zero when surfaces are off.
    pub fn effective_alpha_filled(&self) -> u8 {
        if self.filled {
            self.alpha_filled
        } else {
            0
        }
    }

    /// Outline alpha actually submitted: zero when outlines are off.
    pub fn effective_alpha_outline(&self) -> u8 {
        if self.outline {
            self.alpha_outline
        } else {
            0
        }
    }
}

fn parse_alpha(key: &str, value: i64) -> Result<u8, NoteEspError> {
    u8::try_from(value)
        .map_err(|_| NoteEspError::Config(format!("{} must be within 0..=255, got {}", key, value)))
}

fn check_range(key: &str, value: f32, range: &RangeInclusive<f32>) -> Result<(), NoteEspError> {
    // NaN fails `contains`
    if range.contains(&value) {
        Ok(())
    } else {
        Err(NoteEspError::Config(format!(
            "{} must be within {}..={}, got {}",
            key,
            range.start(),
            range.end(),
            value
        )))
    }
}
