//! Overlay pass: note ordinals over the blocks.

use glam::Vec2;

use super::{Camera, OverlaySurface, TextLabel};
use crate::config::RenderConfig;
use crate::coord::BlockPos;
use crate::error::NoteEspError;
use crate::note::Note;

/// Configured text scale is doubled before drawing.
pub const TEXT_SCALE_FACTOR: f32 = 2.0;

/// Draw one label per entry, horizontally centred on the projected block
/// centre with the baseline on the projected point.
///
/// Labels whose anchor is behind the camera or off screen are still
/// submitted, flagged invisible. The first backend error stops the pass.
pub fn render_labels(
    entries: &[(BlockPos, Note)],
    camera: &Camera,
    config: &RenderConfig,
    surface: &mut dyn OverlaySurface,
) -> Result<(), NoteEspError> {
    if entries.is_empty() {
        return Ok(());
    }

    let view_projection = camera.view_projection();
    let scale = config.text_scale * TEXT_SCALE_FACTOR;

    for (pos, note) in entries {
        let screen = camera.project_with(&view_projection, pos.center());
        let text = note.label();
        let width = surface.text_width(&text);
        let label = TextLabel {
            offset: Vec2::new(width / -2.0, 0.0),
            anchor: screen.as_vec2(),
            scale,
            color: note.color(),
            visible: screen.visible,
            text,
        };
        surface.draw_text(&label)?;
    }
    Ok(())
}
