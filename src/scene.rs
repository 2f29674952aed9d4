//! # Recorded Scenes
//!
//! A scene file captures a camera and a stream of packets so a frame can be
//! reproduced outside the game.
//!
//! ```yaml
//! camera:
//!   eye: [0.0, 70.0, 8.0]
//!   target: [0.0, 64.0, 0.0]
//!   width: 1280
//!   height: 720
//! events:
//!   - kind: sound-effect
//!     sound: block.note.harp
//!     x: 0.5
//!     y: 64.5
//!     z: 0.5
//!     pitch: 1.0
//!   - kind: other
//!     name: keep-alive
//! ```

use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::NoteEspError;
use crate::event::{Packet, PacketBus};
use crate::render::{Camera, SvgFrame};
use crate::session::NoteEsp;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub camera: Camera,
    #[serde(default)]
    pub events: Vec<Packet>,
}

impl Scene {
    pub fn from_yaml(content: &str) -> Result<Self, NoteEspError> {
        let scene: Scene =
            serde_yaml::from_str(content).map_err(|e| NoteEspError::Scene(e.to_string()))?;
        if scene.camera.width == 0 || scene.camera.height == 0 {
            return Err(NoteEspError::Scene("camera viewport must not be empty".to_string()));
        }
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, NoteEspError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Publish every event to `esp` through a bus, wait for ingestion to
    /// finish, and render one frame.
    pub fn replay(&self, esp: &Arc<NoteEsp>) -> Result<SvgFrame, NoteEspError> {
        let bus = Arc::new(PacketBus::new());
        let listener = esp.attach(&bus)?;
        for event in &self.events {
            bus.publish(event.clone());
        }
        listener.detach();
        info!(
            "replayed {} events, {} notes cached",
            self.events.len(),
            esp.store().len()
        );

        let mut frame = SvgFrame::new(self.camera.clone());
        esp.render_world(&mut frame)?;
        esp.render_overlay(&self.camera, &mut frame)?;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
camera:
  eye: [0.5, 66.0, 6.0]
  target: [0.5, 64.5, 0.5]
  width: 640
  height: 480
events:
  - kind: sound-effect
    sound: block.note.harp
    x: 0.5
    y: 64.5
    z: 0.5
    pitch: 1.0
  - kind: sound-effect
    sound: entity.pig.ambient
    x: 2.5
    y: 64.5
    z: 0.5
    pitch: 1.0
  - kind: other
    name: keep-alive
"#;

    #[test]
    fn test_parse_scene_with_camera_defaults() {
        let scene = Scene::from_yaml(SCENE).unwrap();
        assert_eq!(scene.events.len(), 3);
        assert_eq!(scene.camera.fov_degrees, 70.0);
        assert_eq!(scene.camera.up, glam::Vec3::Y);
    }

    #[test]
    fn test_empty_viewport_is_rejected() {
        let yaml = "camera:\n  eye: [0, 0, 1]\n  target: [0, 0, 0]\n  width: 0\n  height: 10\n";
        assert!(matches!(Scene::from_yaml(yaml), Err(NoteEspError::Scene(_))));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let camera_typo = "camera:\n  eye: [0.0, 0.0, 1.0]\n  target: [0.0, 0.0, 0.0]\n  fov_degrees: 10.0\n  width: 4\n  height: 4\n";
        assert!(matches!(Scene::from_yaml(camera_typo), Err(NoteEspError::Scene(_))));

        let scene_typo = "camera:\n  eye: [0.0, 0.0, 1.0]\n  target: [0.0, 0.0, 0.0]\n  width: 4\n  height: 4\npackets: []\n";
        assert!(matches!(Scene::from_yaml(scene_typo), Err(NoteEspError::Scene(_))));

        let spelled_out = "camera:\n  eye: [0.0, 0.0, 1.0]\n  target: [0.0, 0.0, 0.0]\n  fov-degrees: 10.0\n  width: 4\n  height: 4\n";
        assert_eq!(Scene::from_yaml(spelled_out).unwrap().camera.fov_degrees, 10.0);
    }

    #[test]
    fn test_missing_camera_is_rejected() {
        assert!(matches!(Scene::from_yaml("events: []"), Err(NoteEspError::Scene(_))));
    }

    #[test]
    fn test_replay_renders_the_note_block() {
        let scene = Scene::from_yaml(SCENE).unwrap();
        let esp = Arc::new(NoteEsp::new());
        let frame = scene.replay(&esp).unwrap();

        assert_eq!(esp.store().len(), 1);
        // 6 faces + 12 edges
        assert_eq!(frame.geometry_count(), 18);
        assert_eq!(frame.label_count(), 1);

        let svg = frame.to_svg().unwrap();
        assert!(svg.contains(">12</text>"));
    }
}
