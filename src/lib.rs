//! # noteesp
//!
//! Shows the pitch of note blocks by listening to the sounds they make.
//!
//! Every sound effect packet is checked against the note block sounds. A match
//! is turned into an instrument and one of 25 pitches, cached by block
//! position, and drawn each frame as a colored box with the pitch ordinal
//! floating above it.
//!
//! ## Example
//! ```rust
//! use noteesp::{BlockPos, Camera, NoteEsp, Note, Packet, SoundEffectPacket, SvgFrame};
//! use glam::Vec3;
//!
//! let esp = NoteEsp::new();
//! esp.handle_packet(&Packet::SoundEffect(SoundEffectPacket {
//!     sound: "block.note.harp".to_string(),
//!     x: 0.5,
//!     y: 64.5,
//!     z: 0.5,
//!     pitch: 1.0,
//! }));
//! assert_eq!(esp.store().get(BlockPos::new(0, 64, 0)), Some(Note::FSharp4));
//!
//! let camera = Camera::new(Vec3::new(0.5, 66.0, 6.0), Vec3::new(0.5, 64.5, 0.5), 640, 480);
//! let mut frame = SvgFrame::new(camera.clone());
//! esp.render_world(&mut frame)?;
//! esp.render_overlay(&camera, &mut frame)?;
//! let svg = frame.to_svg()?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), noteesp::NoteEspError>(())
//! ```

pub mod classify;
pub mod config;
pub mod coord;
pub mod error;
pub mod event;
pub mod instrument;
pub mod note;
pub mod render;
pub mod scene;
pub mod session;
pub mod store;

pub use classify::{classify, Classification};
pub use config::RenderConfig;
pub use coord::BlockPos;
pub use error::*;
pub use event::{ListenerHandle, Packet, PacketBus, SoundEffectPacket, Subscription};
pub use instrument::Instrument;
pub use note::{Color, Note};
pub use render::{
    BoxBatch, Camera, EspBatch, EspBox, OverlaySurface, ScreenPos, SvgFrame, TextLabel, WorldSurface,
};
pub use scene::Scene;
pub use session::{debug_message, LogSink, MessageSink, NoteEsp};
pub use store::ObservationStore;
