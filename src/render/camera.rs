//! Perspective camera and world-to-screen projection.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::Deserialize;

/// Smallest clip-space `w` treated as in front of the camera.
const MIN_CLIP_W: f32 = 1e-5;

/// Where a world point lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    /// Pixels from the left edge.
    pub x: f32,
    /// Pixels from the top edge.
    pub y: f32,
    /// In front of the camera, regardless of the viewport.
    pub in_front: bool,
    /// In front of the camera and inside the viewport.
    pub visible: bool,
}

impl ScreenPos {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_fov() -> f32 {
    70.0
}

fn default_near() -> f32 {
    0.05
}

fn default_far() -> f32 {
    512.0
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, width: u32, height: u32) -> Self {
        Self {
            eye,
            target,
            up: default_up(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let projection =
            Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect(), self.near, self.far);
        projection * view
    }

    /// Project a world point to pixel coordinates.
    ///
    /// Never fails: points behind the camera still get finite coordinates
    /// (mirrored through the eye), just with `visible = false`.
    pub fn to_screen_pos(&self, world: Vec3) -> ScreenPos {
        self.project_with(&self.view_projection(), world)
    }

    /// Same as [`Camera::to_screen_pos`] with a precomputed matrix, for
    /// projecting many points per frame.
    pub fn project_with(&self, view_projection: &Mat4, world: Vec3) -> ScreenPos {
        let clip = *view_projection * world.extend(1.0);
        let in_front = clip.w > MIN_CLIP_W;
        let w = if in_front { clip.w } else { clip.w.abs().max(MIN_CLIP_W) };
        let ndc = clip.xyz() / w;

        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        let on_screen = (-1.0..=1.0).contains(&ndc.x) && (-1.0..=1.0).contains(&ndc.y);
        ScreenPos {
            x,
            y,
            in_front,
            visible: in_front && on_screen && x.is_finite() && y.is_finite(),
        }
    }
}
