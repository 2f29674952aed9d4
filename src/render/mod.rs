//! # Render Module
//!
//! Draws the cached notes every frame in two independent passes.
//!
//! ## Passes
//! 1. **World pass** ([`EspBatch`]) - one box per cached position, filled and
//!    outlined in the note color, submitted to the backend as a single batch
//! 2. **Overlay pass** ([`render_labels`]) - the note ordinal as text, centred
//!    on the projected centre of the block
//!
//! Both passes read a store snapshot and the current [`RenderConfig`]; neither
//! mutates the store. An empty snapshot makes both passes no-ops.
//!
//! ## Backends
//! Drawing goes through two small traits so the host decides how pixels are
//! produced:
//! - [`WorldSurface`] receives box batches
//! - [`OverlaySurface`] measures and draws text
//!
//! [`SvgFrame`] implements both and writes the frame as an SVG document.
//! Backend errors are returned to the caller unchanged.
//!
//! [`RenderConfig`]: crate::RenderConfig

mod camera;
mod esp;
mod label;
mod svg;


use glam::{Vec2, Vec3};

use crate::error::NoteEspError;
use crate::note::Color;

pub use camera::{Camera, ScreenPos};
pub use esp::EspBatch;
pub use label::{render_labels, TEXT_SCALE_FACTOR};
pub use svg::SvgFrame;

/// A unit box to draw, in the note color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EspBox {
    /// Minimum corner in world space; the box spans one block.
    pub min: Vec3,
    /// Opaque base color; alphas come from the batch.
    pub color: Color,
}

impl EspBox {
    pub fn max(&self) -> Vec3 {
        self.min + Vec3::ONE
    }

    /// The eight corners, bottom face first, counter-clockwise seen from above.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max());
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(a.x, b.y, b.z),
        ]
    }
}

/// Corner indices of the six faces.
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Corner index pairs of the twelve edges.
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Every box of one frame, with the shared style.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBatch {
    pub boxes: Vec<EspBox>,
    /// Surface alpha, zero when filling is off.
    pub alpha_filled: u8,
    /// Outline alpha, zero when outlines are off.
    pub alpha_outline: u8,
    pub thickness: f32,
}

/// One label of the overlay pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Projected block centre in pixels.
    pub anchor: Vec2,
    /// Offset from the anchor before scaling: `(-width / 2, 0)`.
    pub offset: Vec2,
    pub scale: f32,
    pub color: Color,
    pub visible: bool,
}

impl TextLabel {
    /// Where the text baseline starts, in pixels.
    pub fn origin(&self) -> Vec2 {
        self.anchor + self.offset * self.scale
    }
}

/// Receives world-space geometry.
pub trait WorldSurface {
    fn draw_boxes(&mut self, batch: &BoxBatch) -> Result<(), NoteEspError>;
}

/// Receives screen-space text.
pub trait OverlaySurface {
    /// Unscaled width of `text` in pixels.
    fn text_width(&self, text: &str) -> f32;

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), NoteEspError>;
}
