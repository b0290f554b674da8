use engine::Vec2;

/// Axis-aligned box with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub position: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x / 2.0,
            self.position.y + self.size.y / 2.0,
        )
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.position.x < other.position.x + other.size.x
            && self.position.x + self.size.x > other.position.x
            && self.position.y < other.position.y + other.size.y
            && self.position.y + self.size.y > other.position.y
    }

    pub fn center_distance(&self, other: &Aabb) -> f32 {
        self.center().distance(other.center())
    }
}

/// Clamps `position` so a box of `size` stays inside `[0, bounds]` on each
/// axis independently.
pub fn clamp_to_bounds(position: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(
        position.x.clamp(0.0, (bounds.x - size.x).max(0.0)),
        position.y.clamp(0.0, (bounds.y - size.y).max(0.0)),
    )
}
