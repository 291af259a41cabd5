//! Integer axis-aligned rectangles
//!
//! All collision geometry in the simulation is expressed with [`Rect`]: a
//! top-left position plus a size, in field pixels with y growing downward.

use glam::IVec2;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Move horizontally so the left edge sits at `x`
    pub fn set_left(&mut self, x: i32) {
        self.pos.x = x;
    }

    /// Move horizontally so the right edge sits at `x`
    pub fn set_right(&mut self, x: i32) {
        self.pos.x = x - self.size.x;
    }

    /// Move vertically so the top edge sits at `y`
    pub fn set_top(&mut self, y: i32) {
        self.pos.y = y;
    }

    /// Move vertically so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: i32) {
        self.pos.y = y - self.size.y;
    }

    /// Center point (rounded toward the top-left)
    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Move so the center sits at `center`
    pub fn set_center(&mut self, center: IVec2) {
        self.pos = center - self.size / 2;
    }

    /// True if the interiors overlap. Rectangles that only share an edge do not.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
