//! Axis-aligned bounding-box geometry
//!
//! Every entity-pair test in the game goes through [`Aabb::intersects`]; it
//! must stay the single implementation so platform landing, fatal contact,
//! and pickup checks all agree on what "touching" means.

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at `pos` (top-left corner)
    pub fn at(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    /// Strict overlap test: boxes that merely share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Right edge x
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// "Has position and size" - the shape contract shared by all spatial
/// entities, consumed only by collision checks and the renderer.
pub trait Bounds {
    fn bounds(&self) -> Aabb;
}
