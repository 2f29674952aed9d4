//! # Note Annotations
//!
//! The 25 pitches a note block can play, from F#3 (ordinal 0) to F#5 (ordinal 24).
//!
//! ## Key Concepts
//!
//! ### Ordinal
//! The ordinal is the number of right-clicks a note block needs to reach the pitch.
//! It is what the overlay prints above the block.
//!
//! ### Color
//! Each pitch has the color of the note particle the game spawns for it. The hue
//! cycles once across the two octaves:
//! - `r = sin(2πt) * 0.65 + 0.35`
//! - `g = sin(2π(t + 1/3)) * 0.65 + 0.35`
//! - `b = sin(2π(t + 2/3)) * 0.65 + 0.35`
//!
//! where `t = ordinal / 24`, each channel clamped at zero.

use serde::Serialize;
use std::f64::consts::TAU;
use std::fmt;

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha not included.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0..=1.0 opacity.
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// Pitch of a note block, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Note {
    FSharp3,
    G3,
    GSharp3,
    A3,
    ASharp3,
    B3,
    C4,
    CSharp4,
    D4,
    DSharp4,
    E4,
    F4,
    FSharp4,
    G4,
    GSharp4,
    A4,
    ASharp4,
    B4,
    C5,
    CSharp5,
    D5,
    DSharp5,
    E5,
    F5,
    FSharp5,
}

impl Note {
    /// Every note in ordinal order.
    pub const ALL: [Note; 25] = [
        Note::FSharp3,
        Note::G3,
        Note::GSharp3,
        Note::A3,
        Note::ASharp3,
        Note::B3,
        Note::C4,
        Note::CSharp4,
        Note::D4,
        Note::DSharp4,
        Note::E4,
        Note::F4,
        Note::FSharp4,
        Note::G4,
        Note::GSharp4,
        Note::A4,
        Note::ASharp4,
        Note::B4,
        Note::C5,
        Note::CSharp5,
        Note::D5,
        Note::DSharp5,
        Note::E5,
        Note::F5,
        Note::FSharp5,
    ];

    pub const LOWEST: Note = Note::FSharp3;
    pub const HIGHEST: Note = Note::FSharp5;

    /// Look up a note by ordinal. Returns `None` outside 0..=24.
    pub fn from_ordinal(ordinal: usize) -> Option<Note> {
        Self::ALL.get(ordinal).copied()
    }

    /// Look up a note by a possibly out-of-range index, clamping to the nearest
    /// valid note.
    ///
    /// # Examples
    /// ```
    /// use noteesp::Note;
    ///
    /// assert_eq!(Note::from_index_clamped(12), Note::FSharp4);
    /// assert_eq!(Note::from_index_clamped(-3), Note::FSharp3);
    /// assert_eq!(Note::from_index_clamped(31), Note::FSharp5);
    /// ```
    pub fn from_index_clamped(index: i64) -> Note {
        let clamped = index.clamp(0, Self::HIGHEST.ordinal() as i64);
        Self::ALL[clamped as usize]
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Text drawn above the block: the ordinal in decimal.
    pub fn label(self) -> String {
        self.ordinal().to_string()
    }

    /// Scientific pitch name, e.g. `F#4`.
    pub fn name(self) -> &'static str {
        match self {
            Note::FSharp3 => "F#3",
            Note::G3 => "G3",
            Note::GSharp3 => "G#3",
            Note::A3 => "A3",
            Note::ASharp3 => "A#3",
            Note::B3 => "B3",
            Note::C4 => "C4",
            Note::CSharp4 => "C#4",
            Note::D4 => "D4",
            Note::DSharp4 => "D#4",
            Note::E4 => "E4",
            Note::F4 => "F4",
            Note::FSharp4 => "F#4",
            Note::G4 => "G4",
            Note::GSharp4 => "G#4",
            Note::A4 => "A4",
            Note::ASharp4 => "A#4",
            Note::B4 => "B4",
            Note::C5 => "C5",
            Note::CSharp5 => "C#5",
            Note::D5 => "D5",
            Note::DSharp5 => "D#5",
            Note::E5 => "E5",
            Note::F5 => "F5",
            Note::FSharp5 => "F#5",
        }
    }

    /// Note particle color for this pitch, fully opaque.
    pub fn color(self) -> Color {
        let t = self.ordinal() as f64 / 24.0;
        let channel = |phase: f64| {
            let v = ((t + phase) * TAU).sin() * 0.65 + 0.35;
            (v.max(0.0) * 255.0).round() as u8
        };
        Color::rgb(channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
