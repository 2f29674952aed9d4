//! World cell coordinates.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer position of a block in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing a fractional world position. Each axis is floored, so
    /// `-0.5` lands in cell `-1`.
    ///
    /// # Examples
    /// ```
    /// use noteesp::BlockPos;
    ///
    /// assert_eq!(BlockPos::containing(10.5, 64.0, -3.5), BlockPos::new(10, 64, -4));
    /// ```
    pub fn containing(x: f64, y: f64, z: f64) -> Self {
        // `as` saturates, NaN becomes 0
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
            z: z.floor() as i32,
        }
    }

    /// Minimum corner in world space.
    pub fn min_corner(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Centre of the cell in world space.
    pub fn center(self) -> Vec3 {
        self.min_corner() + Vec3::splat(0.5)
    }
}

impl fmt::Display for BlockPos {
    /// `(x,y,z)` without spaces, as used in debug messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_each_axis() {
        assert_eq!(BlockPos::containing(0.0, 0.999, -0.001), BlockPos::new(0, 0, -1));
        assert_eq!(BlockPos::containing(-8.0, 255.5, 7.25), BlockPos::new(-8, 255, 7));
    }

    #[test]
    fn test_center() {
        assert_eq!(BlockPos::new(1, -2, 3).center(), Vec3::new(1.5, -1.5, 3.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(BlockPos::new(-12, 70, 4).to_string(), "(-12,70,4)");
    }
}
