//! # Session
//!
//! [`NoteEsp`] is the overlay for one game session. It owns the observation
//! store, the render configuration and the debug sink, and is shared by
//! reference between the ingestion thread and the render hooks.
//!
//! ## Threads
//! - Ingestion: [`NoteEsp::handle_packet`], usually driven by [`NoteEsp::attach`]
//! - Rendering: [`NoteEsp::render_world`] and [`NoteEsp::render_overlay`], once
//!   per frame each
//! - Settings UI: [`NoteEsp::set_config`], [`NoteEsp::update_config`],
//!   [`NoteEsp::reset`]
//!
//! None of these block each other for longer than a map shard or a config copy.

use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::classify::{classify, Classification};
use crate::config::RenderConfig;
use crate::coord::BlockPos;
use crate::error::NoteEspError;
use crate::event::{ListenerHandle, Packet, PacketBus};
use crate::render::{render_labels, Camera, EspBatch, OverlaySurface, WorldSurface};
use crate::store::ObservationStore;

/// Destination for human-readable debug lines.
pub trait MessageSink: Send + Sync {
    fn send(&self, message: &str);
}

/// Writes debug lines to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn send(&self, message: &str) {
        info!(target: "noteesp::debug", "{}", message);
    }
}

/// Debug line for a classified sound.
///
/// # Examples
/// ```
/// use noteesp::{debug_message, BlockPos, Classification, Instrument, Note};
///
/// let c = Classification { instrument: Instrument::Piano, note: Note::FSharp4 };
/// assert_eq!(
///     debug_message(&c, BlockPos::new(1, 64, -2)),
///     "Instrument: PIANO Pos: (1,64,-2) Pitch: F#4"
/// );
/// ```
pub fn debug_message(classification: &Classification, pos: BlockPos) -> String {
    format!(
        "Instrument: {} Pos: {} Pitch: {}",
        classification.instrument, pos, classification.note
    )
}

pub struct NoteEsp {
    store: ObservationStore,
    config: RwLock<RenderConfig>,
    batch: Mutex<EspBatch>,
    sink: Box<dyn MessageSink>,
}

impl Default for NoteEsp {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteEsp {
    pub fn new() -> Self {
        Self {
            store: ObservationStore::new(),
            config: RwLock::new(RenderConfig::default()),
            batch: Mutex::new(EspBatch::default()),
            sink: Box::new(LogSink),
        }
    }

    pub fn with_config(config: RenderConfig) -> Result<Self, NoteEspError> {
        let esp = Self::new();
        esp.set_config(config)?;
        Ok(esp)
    }

    pub fn with_sink(mut self, sink: impl MessageSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    /// Copy of the current configuration.
    pub fn config(&self) -> RenderConfig {
        self.config.read().clone()
    }

    /// Replace the configuration. Invalid values leave the old one in place.
    pub fn set_config(&self, config: RenderConfig) -> Result<(), NoteEspError> {
        config.validate()?;
        *self.config.write() = config;
        Ok(())
    }

    /// Edit a copy of the configuration and install it if it validates.
    pub fn update_config<F>(&self, edit: F) -> Result<(), NoteEspError>
    where
        F: FnOnce(&mut RenderConfig),
    {
        let mut config = self.config();
        edit(&mut config);
        self.set_config(config)
    }

    /// Ingest one packet. Sound effects of note blocks are classified and
    /// cached; everything else is ignored without touching the store.
    pub fn handle_packet(&self, packet: &Packet) -> Option<Classification> {
        let sound = match packet {
            Packet::SoundEffect(sound) => sound,
            Packet::Other { .. } => return None,
        };
        let Some(classification) = classify(&sound.sound, sound.pitch) else {
            debug!("ignoring sound '{}' at pitch {}", sound.sound, sound.pitch);
            return None;
        };

        let pos = BlockPos::containing(sound.x, sound.y, sound.z);
        self.store.record(pos, classification.note);

        if self.config.read().debug {
            self.sink.send(&debug_message(&classification, pos));
        }
        Some(classification)
    }

    /// Forget every cached note.
    pub fn reset(&self) {
        let cleared = self.store.len();
        self.store.clear();
        info!("reset cleared {} cached notes", cleared);
    }

    /// Momentary reset switch for settings UIs: `true` clears the cache. The
    /// returned value is the state the switch should show, always `false`.
    pub fn set_reset(&self, value: bool) -> bool {
        if value {
            self.reset();
        }
        false
    }

    /// World pass: one batched box draw for every cached note.
    pub fn render_world(&self, surface: &mut dyn WorldSurface) -> Result<(), NoteEspError> {
        let config = self.config();
        let entries = self.store.snapshot();

        let mut batch = self.batch.lock();
        batch.apply_config(&config);
        batch.extend_notes(&entries);
        batch.render(surface, true)
    }

    /// Overlay pass: the note ordinal above every cached note.
    pub fn render_overlay(&self, camera: &Camera, surface: &mut dyn OverlaySurface) -> Result<(), NoteEspError> {
        let config = self.config();
        let entries = self.store.snapshot();
        render_labels(&entries, camera, &config, surface)
    }

    /// Feed packets published on `bus` into this overlay on a dedicated thread
    /// until the returned handle is detached or dropped.
    pub fn attach(self: &Arc<Self>, bus: &Arc<PacketBus>) -> Result<ListenerHandle, NoteEspError> {
        let esp = Arc::clone(self);
        let handle = bus.spawn_listener("noteesp-ingest", move |packet| {
            esp.handle_packet(&packet);
        })?;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SoundEffectPacket;
    use crate::instrument::Instrument;
    use crate::note::Note;

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl MessageSink for Arc<Collect> {
        fn send(&self, message: &str) {
            self.0.lock().push(message.to_string());
        }
    }

    fn sound(name: &str, x: f64, y: f64, z: f64, pitch: f32) -> Packet {
        Packet::SoundEffect(SoundEffectPacket {
            sound: name.to_string(),
            x,
            y,
            z,
            pitch,
        })
    }

    #[test]
    fn test_handle_packet_records_note() {
        let esp = NoteEsp::new();
        let c = esp.handle_packet(&sound("block.note.harp", 4.5, 64.5, -2.5, 1.0)).unwrap();

        assert_eq!(c.instrument, Instrument::Piano);
        assert_eq!(c.note, Note::FSharp4);
        assert_eq!(esp.store().get(BlockPos::new(4, 64, -3)), Some(Note::FSharp4));
    }

    #[test]
    fn test_unknown_sound_and_other_packets_leave_store_alone() {
        let esp = NoteEsp::new();
        assert!(esp.handle_packet(&sound("entity.sheep.ambient", 0.0, 0.0, 0.0, 1.0)).is_none());
        assert!(esp.handle_packet(&Packet::Other { name: "chat".to_string() }).is_none());
        assert!(esp.store().is_empty());
    }

    #[test]
    fn test_debug_messages_only_when_enabled() {
        let collect = Arc::new(Collect::default());
        let esp = NoteEsp::new().with_sink(Arc::clone(&collect));

        esp.handle_packet(&sound("block.note.bell", 0.5, 1.5, 2.5, 2.0));
        assert!(collect.0.lock().is_empty());

        esp.update_config(|c| c.debug = true).unwrap();
        esp.handle_packet(&sound("block.note.bell", 0.5, 1.5, 2.5, 2.0));
        assert_eq!(
            *collect.0.lock(),
            vec!["Instrument: BELL Pos: (0,1,2) Pitch: F#5".to_string()]
        );
    }

    #[test]
    fn test_reset_switch_is_momentary() {
        let esp = NoteEsp::new();
        esp.handle_packet(&sound("block.note.snare", 0.0, 0.0, 0.0, 1.0));

        assert!(!esp.set_reset(false));
        assert_eq!(esp.store().len(), 1);

        assert!(!esp.set_reset(true));
        assert!(esp.store().is_empty());
    }

    #[test]
    fn test_invalid_config_is_not_installed() {
        let esp = NoteEsp::new();
        let result = esp.update_config(|c| c.thickness = 10.0);
        assert!(matches!(result, Err(NoteEspError::Config(_))));
        assert_eq!(esp.config().thickness, 2.0);
    }

    #[test]
    fn test_attach_ingests_published_packets() {
        let esp = Arc::new(NoteEsp::new());
        let bus = Arc::new(PacketBus::new());
        let handle = esp.attach(&bus).unwrap();

        for x in 0..10 {
            bus.publish(sound("block.note.guitar", x as f64, 70.0, 0.0, 0.5));
        }
        bus.publish(Packet::Other { name: "keep-alive".to_string() });
        handle.detach();

        assert_eq!(esp.store().len(), 10);
        assert_eq!(bus.subscriber_count(), 0);
        // Published after detach: nobody listens
        assert_eq!(bus.publish(sound("block.note.guitar", 99.0, 70.0, 0.0, 0.5)), 0);
        assert_eq!(esp.store().len(), 10);
    }
}
