//! # Classification
//!
//! Turns a sound identifier and a playback pitch into an instrument and a note.
//!
//! ## Pitch Mapping
//! Note blocks play their sound at `pitch = 2^((ordinal - 12) / 12)`, so the
//! ordinal is recovered with
//!
//! ```text
//! ordinal = round(12 * log2(pitch)) + 12
//! ```
//!
//! Rounding is half-up. Results outside 0..=24 are clamped to the nearest
//! note. Pitches that are zero, negative or not finite have no logarithm and
//! make the event not applicable.

use serde::Serialize;

use crate::instrument::Instrument;
use crate::note::Note;

/// Semitones per octave in the pitch scale.
const SEMITONES_PER_OCTAVE: f64 = 12.0;
/// Ordinal of pitch 1.0 (F#4).
const PITCH_ONE_ORDINAL: i64 = 12;

/// Result of classifying a sound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub instrument: Instrument,
    pub note: Note,
}

/// Classify a sound event.
///
/// Returns `None` for sounds that are not note block sounds and for pitches
/// without a logarithm. Pure: the same input always yields the same output.
///
/// # Examples
/// ```
/// use noteesp::{classify, Instrument, Note};
///
/// let c = classify("block.note.harp", 1.0).unwrap();
/// assert_eq!(c.instrument, Instrument::Piano);
/// assert_eq!(c.note, Note::FSharp4);
///
/// assert_eq!(classify("block.note.bell", 2.0).unwrap().note, Note::FSharp5);
/// assert_eq!(classify("block.note.bell", 0.5).unwrap().note, Note::FSharp3);
/// assert!(classify("entity.cow.ambient", 1.0).is_none());
/// ```
pub fn classify(sound: &str, pitch: f32) -> Option<Classification> {
    let instrument = Instrument::from_sound(sound)?;
    let index = pitch_to_index(pitch)?;
    Some(Classification {
        instrument,
        note: Note::from_index_clamped(index),
    })
}

/// Unclamped note index for a pitch, or `None` if the pitch has no logarithm.
///
/// # Examples
/// ```
/// use noteesp::classify::pitch_to_index;
///
/// assert_eq!(pitch_to_index(1.0), Some(12));
/// assert_eq!(pitch_to_index(4.0), Some(36));
/// assert_eq!(pitch_to_index(0.0), None);
/// ```
pub fn pitch_to_index(pitch: f32) -> Option<i64> {
    let pitch = pitch as f64;
    if !pitch.is_finite() || pitch <= 0.0 {
        return None;
    }
    let semitones = (SEMITONES_PER_OCTAVE * pitch.log2() + 0.5).floor();
    Some(semitones as i64 + PITCH_ONE_ORDINAL)
}
