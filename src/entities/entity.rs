/// Visual state of anything drawn on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteState {
    Normal,
    /// Player ship after being hit, until its destruction timer runs out
    Destroyed,
    /// Enemy ship playing its explosion before removal
    Exploding,
}

/// Positioned, sized object on the playfield.
///
/// Coordinates are playfield pixels with the origin at the top left corner.
/// Nothing here clamps the position; callers keep entities in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub sprite: SpriteState,
}

impl Entity {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            sprite: SpriteState::Normal,
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Axis-aligned bounding box test; touching edges do not count
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
