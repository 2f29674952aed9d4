//! Instrument lookup from sound identifiers.

use serde::Serialize;
use std::fmt;

/// Instrument family a note block sound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Instrument {
    Piano,
    BassDrum,
    Snare,
    Clicks,
    BassGuitar,
    Flute,
    Bell,
    Guitar,
    Chime,
    Xylophone,
}

/// Namespace the game prefixes resource identifiers with.
const SOUND_NAMESPACE: &str = "minecraft:";

impl Instrument {
    /// Map a sound identifier (e.g. `block.note.harp`) to its instrument.
    ///
    /// The `minecraft:` namespace prefix is optional. Anything that is not a
    /// note block sound returns `None`.
    ///
    /// # Examples
    /// ```
    /// use noteesp::Instrument;
    ///
    /// assert_eq!(Instrument::from_sound("block.note.harp"), Some(Instrument::Piano));
    /// assert_eq!(Instrument::from_sound("minecraft:block.note.hat"), Some(Instrument::Clicks));
    /// assert_eq!(Instrument::from_sound("entity.pig.ambient"), None);
    /// ```
    pub fn from_sound(sound: &str) -> Option<Self> {
        let sound = sound.trim();
        let sound = sound.strip_prefix(SOUND_NAMESPACE).unwrap_or(sound);
        match sound {
            "block.note.harp" => Some(Instrument::Piano),
            "block.note.basedrum" => Some(Instrument::BassDrum),
            "block.note.snare" => Some(Instrument::Snare),
            "block.note.hat" => Some(Instrument::Clicks),
            "block.note.bass" => Some(Instrument::BassGuitar),
            "block.note.flute" => Some(Instrument::Flute),
            "block.note.bell" => Some(Instrument::Bell),
            "block.note.guitar" => Some(Instrument::Guitar),
            "block.note.chime" => Some(Instrument::Chime),
            "block.note.xylophone" => Some(Instrument::Xylophone),
            _ => None,
        }
    }

    /// Upper-case name used in debug messages.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Piano => "PIANO",
            Instrument::BassDrum => "BASSDRUM",
            Instrument::Snare => "SNARE",
            Instrument::Clicks => "CLICKS",
            Instrument::BassGuitar => "BASSGUITAR",
            Instrument::Flute => "FLUTE",
            Instrument::Bell => "BELL",
            Instrument::Guitar => "GUITAR",
            Instrument::Chime => "CHIME",
            Instrument::Xylophone => "XYLOPHONE",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
