//! SVG backend.
//!
//! Records both passes of a frame and writes them as one SVG document: box
//! faces and edges projected through the camera, then the labels on top.
//! Geometry with zero alpha, boxes reaching behind the camera, and invisible
//! labels are left out.

use glam::Vec2;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::{BoxBatch, Camera, OverlaySurface, TextLabel, WorldSurface, BOX_EDGES, BOX_FACES};
use crate::error::NoteEspError;
use crate::note::Color;

/// Advance of one glyph at scale 1, in pixels.
pub const GLYPH_WIDTH: f32 = 6.0;
/// Height of one line at scale 1, in pixels.
pub const GLYPH_HEIGHT: f32 = 9.0;

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Polygon { points: Vec<Vec2>, fill: Color },
    Line { from: Vec2, to: Vec2, stroke: Color, width: f32 },
    Text { origin: Vec2, size: f32, fill: Color, text: String },
}

/// One frame rendered to SVG.
#[derive(Debug, Clone)]
pub struct SvgFrame {
    camera: Camera,
    geometry: Vec<Shape>,
    labels: Vec<Shape>,
}

impl SvgFrame {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            geometry: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Number of polygons and lines recorded by the world pass.
    pub fn geometry_count(&self) -> usize {
        self.geometry.len()
    }

    /// Number of labels recorded by the overlay pass.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Write the document.
    pub fn to_svg(&self) -> Result<String, NoteEspError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let width = self.camera.width.to_string();
        let height = self.camera.height.to_string();
        let view_box = format!("0 0 {} {}", width, height);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("svg").with_attributes([
                ("xmlns", "http://www.w3.org/2000/svg"),
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("viewBox", view_box.as_str()),
            ])),
        )?;
        write_group(&mut writer, "world", &self.geometry)?;
        write_group(&mut writer, "overlay", &self.labels)?;
        write(&mut writer, Event::End(BytesEnd::new("svg")))?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(|e| NoteEspError::Xml(e.to_string()))
    }
}

impl WorldSurface for SvgFrame {
    fn draw_boxes(&mut self, batch: &BoxBatch) -> Result<(), NoteEspError> {
        if batch.alpha_filled == 0 && batch.alpha_outline == 0 {
            return Ok(());
        }
        let view_projection = self.camera.view_projection();

        for esp_box in &batch.boxes {
            let projected = esp_box
                .corners()
                .map(|corner| self.camera.project_with(&view_projection, corner));
            if projected.iter().any(|p| !p.in_front) {
                continue;
            }
            let points = projected.map(|p| p.as_vec2());

            if batch.alpha_filled > 0 {
                let fill = esp_box.color.with_alpha(batch.alpha_filled);
                for face in BOX_FACES {
                    self.geometry.push(Shape::Polygon {
                        points: face.iter().map(|&i| points[i]).collect(),
                        fill,
                    });
                }
            }
            if batch.alpha_outline > 0 {
                let stroke = esp_box.color.with_alpha(batch.alpha_outline);
                for [a, b] in BOX_EDGES {
                    self.geometry.push(Shape::Line {
                        from: points[a],
                        to: points[b],
                        stroke,
                        width: batch.thickness,
                    });
                }
            }
        }
        Ok(())
    }
}

impl OverlaySurface for SvgFrame {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * GLYPH_WIDTH
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), NoteEspError> {
        if !label.visible || label.scale <= 0.0 {
            return Ok(());
        }
        self.labels.push(Shape::Text {
            origin: label.origin(),
            size: GLYPH_HEIGHT * label.scale,
            fill: label.color,
            text: label.text.clone(),
        });
        Ok(())
    }
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), NoteEspError> {
    writer
        .write_event(event)
        .map_err(|e| NoteEspError::Xml(e.to_string()))
}

fn write_group(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    id: &str,
    shapes: &[Shape],
) -> Result<(), NoteEspError> {
    write(writer, Event::Start(BytesStart::new("g").with_attributes([("id", id)])))?;
    for shape in shapes {
        write_shape(writer, shape)?;
    }
    write(writer, Event::End(BytesEnd::new("g")))
}

fn write_shape(writer: &mut Writer<Cursor<Vec<u8>>>, shape: &Shape) -> Result<(), NoteEspError> {
    match shape {
        Shape::Polygon { points, fill } => {
            let points = points
                .iter()
                .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            let hex = fill.to_hex();
            let opacity = format!("{:.3}", fill.opacity());
            write(
                writer,
                Event::Empty(BytesStart::new("polygon").with_attributes([
                    ("points", points.as_str()),
                    ("fill", hex.as_str()),
                    ("fill-opacity", opacity.as_str()),
                ])),
            )
        }
        Shape::Line { from, to, stroke, width } => {
            let coords = [from.x, from.y, to.x, to.y].map(|v| format!("{:.2}", v));
            let hex = stroke.to_hex();
            let opacity = format!("{:.3}", stroke.opacity());
            let width = format!("{}", width);
            write(
                writer,
                Event::Empty(BytesStart::new("line").with_attributes([
                    ("x1", coords[0].as_str()),
                    ("y1", coords[1].as_str()),
                    ("x2", coords[2].as_str()),
                    ("y2", coords[3].as_str()),
                    ("stroke", hex.as_str()),
                    ("stroke-opacity", opacity.as_str()),
                    ("stroke-width", width.as_str()),
                ])),
            )
        }
        Shape::Text { origin, size, fill, text } => {
            let x = format!("{:.2}", origin.x);
            let y = format!("{:.2}", origin.y);
            let size = format!("{:.2}", size);
            let hex = fill.to_hex();
            write(
                writer,
                Event::Start(BytesStart::new("text").with_attributes([
                    ("x", x.as_str()),
                    ("y", y.as_str()),
                    ("font-family", "monospace"),
                    ("font-size", size.as_str()),
                    ("fill", hex.as_str()),
                ])),
            )?;
            write(writer, Event::Text(BytesText::new(text)))?;
            write(writer, Event::End(BytesEnd::new("text")))
        }
    }
}
