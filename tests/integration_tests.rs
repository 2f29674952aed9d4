//! Integration tests for the note overlay
//!
//! Tests the full path from published packets to rendered frames.

use glam::Vec3;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use noteesp::{
    classify, BlockPos, Camera, Instrument, Note, NoteEsp, Packet, PacketBus, RenderConfig, Scene,
    SoundEffectPacket, SvgFrame,
};

fn note_sound(sound: &str, pos: (i32, i32, i32), pitch: f32) -> Packet {
    Packet::SoundEffect(SoundEffectPacket {
        sound: sound.to_string(),
        x: pos.0 as f64 + 0.5,
        y: pos.1 as f64 + 0.5,
        z: pos.2 as f64 + 0.5,
        pitch,
    })
}

fn camera() -> Camera {
    Camera::new(Vec3::new(4.0, 72.0, 16.0), Vec3::new(4.0, 64.0, 0.0), 1280, 720)
}

#[test]
fn test_reference_classifications() {
    let mid = classify("block.note.harp", 1.0).unwrap();
    assert_eq!(mid.instrument, Instrument::Piano);
    assert_eq!(mid.note.ordinal(), 12);

    assert_eq!(classify("block.note.harp", 2.0).unwrap().note, Note::HIGHEST);
    assert_eq!(classify("block.note.harp", 0.5).unwrap().note, Note::LOWEST);
}

#[test]
fn test_packets_to_frame() {
    let esp = Arc::new(NoteEsp::new());
    let bus = Arc::new(PacketBus::new());
    let listener = esp.attach(&bus).unwrap();

    bus.publish(note_sound("block.note.harp", (0, 64, 0), 1.0));
    bus.publish(note_sound("block.note.bass", (4, 64, 0), 0.5));
    bus.publish(note_sound("block.note.xylophone", (8, 64, 0), 2.0));
    bus.publish(note_sound("entity.player.hurt", (12, 64, 0), 1.0));
    listener.detach();

    let snapshot: HashSet<_> = esp.store().snapshot().into_iter().collect();
    let expected: HashSet<_> = [
        (BlockPos::new(0, 64, 0), Note::FSharp4),
        (BlockPos::new(4, 64, 0), Note::FSharp3),
        (BlockPos::new(8, 64, 0), Note::FSharp5),
    ]
    .into_iter()
    .collect();
    assert_eq!(snapshot, expected);

    let mut frame = SvgFrame::new(camera());
    esp.render_world(&mut frame).unwrap();
    esp.render_overlay(&camera(), &mut frame).unwrap();
    assert_eq!(frame.geometry_count(), 3 * 18);
    assert_eq!(frame.label_count(), 3);

    let svg = frame.to_svg().unwrap();
    for label in [">0</text>", ">12</text>", ">24</text>"] {
        assert!(svg.contains(label), "missing {}", label);
    }
}

#[test]
fn test_repeated_sound_overwrites_note() {
    let esp = NoteEsp::new();
    esp.handle_packet(&note_sound("block.note.flute", (1, 2, 3), 0.5));
    esp.handle_packet(&note_sound("block.note.flute", (1, 2, 3), 1.0));

    assert_eq!(esp.store().snapshot(), vec![(BlockPos::new(1, 2, 3), Note::FSharp4)]);
}

#[test]
fn test_reset_then_render_is_empty() {
    let esp = NoteEsp::new();
    for x in 0..5 {
        esp.handle_packet(&note_sound("block.note.chime", (x, 64, 0), 1.0));
    }
    esp.set_reset(true);

    let mut frame = SvgFrame::new(camera());
    esp.render_world(&mut frame).unwrap();
    esp.render_overlay(&camera(), &mut frame).unwrap();
    assert_eq!(frame.geometry_count(), 0);
    assert_eq!(frame.label_count(), 0);
}

#[test]
fn test_hidden_geometry_with_both_toggles_off() {
    let config = RenderConfig {
        filled: false,
        outline: false,
        ..RenderConfig::default()
    };
    let esp = NoteEsp::with_config(config).unwrap();
    esp.handle_packet(&note_sound("block.note.bell", (4, 64, 0), 1.0));

    let mut frame = SvgFrame::new(camera());
    esp.render_world(&mut frame).unwrap();
    esp.render_overlay(&camera(), &mut frame).unwrap();
    assert_eq!(frame.geometry_count(), 0);
    // Labels do not depend on the box toggles
    assert_eq!(frame.label_count(), 1);
}

#[test]
fn test_concurrent_ingestion_and_rendering() {
    let esp = Arc::new(NoteEsp::new());
    let bus = Arc::new(PacketBus::new());
    let listener = esp.attach(&bus).unwrap();

    let publishers: Vec<_> = (0..4)
        .map(|p| {
            let bus = Arc::clone(&bus);
            thread::spawn(move || {
                for i in 0..250 {
                    let pitch = 2f32.powf(((i + p) % 25) as f32 / 12.0 - 1.0);
                    bus.publish(note_sound("block.note.harp", (i % 20, 64, p), pitch));
                }
            })
        })
        .collect();

    let renderer = {
        let esp = Arc::clone(&esp);
        thread::spawn(move || {
            for _ in 0..50 {
                let snapshot = esp.store().snapshot();
                let positions: HashSet<_> = snapshot.iter().map(|(pos, _)| *pos).collect();
                assert_eq!(positions.len(), snapshot.len());

                let mut frame = SvgFrame::new(camera());
                esp.render_world(&mut frame).unwrap();
                esp.render_overlay(&camera(), &mut frame).unwrap();
            }
        })
    };

    for publisher in publishers {
        publisher.join().unwrap();
    }
    renderer.join().unwrap();
    listener.detach();

    // 20 x positions on 4 z rows
    assert_eq!(esp.store().len(), 80);
}

#[test]
fn test_scene_replay_with_debug_config() {
    let scene = Scene::from_yaml(
        r#"
camera:
  eye: [4.0, 72.0, 16.0]
  target: [4.0, 64.0, 0.0]
  width: 1280
  height: 720
events:
  - kind: sound-effect
    sound: minecraft:block.note.guitar
    x: 4.2
    y: 64.9
    z: 0.1
    pitch: 0.707107
"#,
    )
    .unwrap();
    let config = RenderConfig::from_yaml("debug: true\ntext-scale: 0.5").unwrap();
    let esp = Arc::new(NoteEsp::with_config(config).unwrap());

    let frame = scene.replay(&esp).unwrap();
    assert_eq!(esp.store().get(BlockPos::new(4, 64, 0)), Some(Note::C4));
    assert_eq!(frame.label_count(), 1);
}
