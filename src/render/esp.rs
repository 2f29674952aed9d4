//! World pass: batched boxes around cached notes.

use log::trace;

use super::{BoxBatch, EspBox, WorldSurface};
use crate::config::RenderConfig;
use crate::coord::BlockPos;
use crate::error::NoteEspError;
use crate::note::{Color, Note};

/// Collects boxes for one frame and submits them in a single draw.
///
/// Style is set once per frame from the [`RenderConfig`]; disabled toggles
/// become zero alpha so the draw path stays the same. The queue keeps its
/// allocation between frames.
#[derive(Debug, Clone)]
pub struct EspBatch {
    pending: BoxBatch,
}

impl Default for EspBatch {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl EspBatch {
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut batch = Self {
            pending: BoxBatch {
                boxes: Vec::new(),
                alpha_filled: 0,
                alpha_outline: 0,
                thickness: 0.0,
            },
        };
        batch.apply_config(config);
        batch
    }

    pub fn apply_config(&mut self, config: &RenderConfig) {
        self.pending.alpha_filled = config.effective_alpha_filled();
        self.pending.alpha_outline = config.effective_alpha_outline();
        self.pending.thickness = config.thickness;
    }

    pub fn add(&mut self, pos: BlockPos, color: Color) {
        self.pending.boxes.push(EspBox {
            min: pos.min_corner(),
            color: color.with_alpha(255),
        });
    }

    /// Queue one box per entry in the note color.
    pub fn extend_notes<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'a (BlockPos, Note)>,
    {
        for (pos, note) in entries {
            self.add(*pos, note.color());
        }
    }

    pub fn len(&self) -> usize {
        self.pending.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.boxes.is_empty()
    }

    /// Boxes the queue can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.pending.boxes.capacity()
    }

    /// Submit everything queued as one batch. Nothing is submitted when the
    /// batch is empty. With `clear` the queue is emptied afterwards, even if
    /// the backend failed.
    pub fn render(&mut self, surface: &mut dyn WorldSurface, clear: bool) -> Result<(), NoteEspError> {
        if self.pending.boxes.is_empty() {
            return Ok(());
        }

        trace!(
            "submitting {} boxes (fill alpha {}, outline alpha {})",
            self.pending.boxes.len(),
            self.pending.alpha_filled,
            self.pending.alpha_outline
        );
        let result = surface.draw_boxes(&self.pending);
        if clear {
            self.pending.boxes.clear();
        }
        result
    }
}
