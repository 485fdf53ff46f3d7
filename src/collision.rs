//! Axis-aligned bounding-box tests shared by every entity pair.

/// True iff the two rectangles overlap. Touching edges do not count.
#[allow(clippy::too_many_arguments)]
pub fn intersects(ax: i32, ay: i32, aw: i32, ah: i32, bx: i32, by: i32, bw: i32, bh: i32) -> bool {
    ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
}

/// A position plus size, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self.x, self.y, self.w, self.h, other.x, other.y, other.w, other.h)
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Anything that occupies a box on the field.
pub trait Bounded {
    fn bounds(&self) -> Rect;

    fn collides_with(&self, other: &impl Bounded) -> bool
    where
        Self: Sized,
    {
        self.bounds().intersects(&other.bounds())
    }
}
