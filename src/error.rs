//! # Error Types
//!
//! This module defines all error types for the note overlay.
//!
//! Most of the module is fail-soft: unknown sounds are ignored, out-of-range
//! pitches are clamped and concurrent access never raises. The errors below
//! cover the places where something outside the core went wrong.
//!
//! ## Error Types
//! - `Config` - Invalid render configuration (bad YAML or out-of-range value)
//! - `Scene` - Invalid recorded scene file (CLI replay input)
//! - `Render` - A rendering backend rejected a draw submission
//! - `Xml` - The SVG writer failed
//! - `Io` - Reading or writing a file failed
//!
//! ## Usage
//! ```rust
//! use noteesp::{NoteEspError, RenderConfig};
//!
//! match RenderConfig::from_yaml("thickness: 9.0") {
//!     Ok(config) => println!("Loaded {:?}", config),
//!     Err(NoteEspError::Config(message)) => eprintln!("Bad config: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Which render pass produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// World-space boxes.
    World,
    /// Screen-space labels.
    Overlay,
}

impl fmt::Display for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderPass::World => write!(f, "world"),
            RenderPass::Overlay => write!(f, "overlay"),
        }
    }
}

#[derive(Error, Debug)]
pub enum NoteEspError {
    /// Invalid render configuration.
    ///
    /// # Example
    /// ```
    /// # use noteesp::NoteEspError;
    /// let err = NoteEspError::Config("thickness must be within 0.25..=4".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: thickness must be within 0.25..=4");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid scene file handed to the replay CLI.
    #[error("Invalid scene: {0}")]
    Scene(String),

    /// A rendering backend failed during a pass.
    ///
    /// # Example
    /// ```
    /// # use noteesp::{NoteEspError, RenderPass};
    /// let err = NoteEspError::Render {
    ///     pass: RenderPass::Overlay,
    ///     message: "font atlas not loaded".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Render error in overlay pass: font atlas not loaded");
    /// ```
    #[error("Render error in {pass} pass: {message}")]
    Render { pass: RenderPass, message: String },

    #[error("SVG output error: {0}")]
    Xml(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
