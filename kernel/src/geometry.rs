use core::ops::Range;

/// A struct for screen coordinate position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pos2D {
    pub x: usize,
    pub y: usize,
}

impl From<(usize, usize)> for Pos2D {
    fn from((x, y): (usize, usize)) -> Self {
        Pos2D { x, y }
    }
}

impl From<Pos2D> for (usize, usize) {
    fn from(pos: Pos2D) -> Self {
        (pos.x, pos.y)
    }
}

/// A struct for screen rectangular area, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect2D {
    pub left_top: Pos2D,
    pub width: usize,
    pub height: usize,
}

impl Rect2D {
    pub fn new(left_top: Pos2D, width: usize, height: usize) -> Self {
        Rect2D { left_top, width, height }
    }

    /// A square of side `size`.
    pub fn square(left_top: Pos2D, size: usize) -> Self {
        Rect2D::new(left_top, size, size)
    }

    /// Intersect with `[0, bound_w) x [0, bound_h)`.
    ///
    /// Sides that would overflow `usize` saturate instead of wrapping.
    pub fn bound(&self, bound_w: usize, bound_h: usize) -> Rect2D {
        let x = self.left_top.x.min(bound_w);
        let y = self.left_top.y.min(bound_h);
        let right = self.left_top.x.saturating_add(self.width).min(bound_w);
        let bottom = self.left_top.y.saturating_add(self.height).min(bound_h);
        Rect2D::new((x, y).into(), right - x, bottom - y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn x_range(&self) -> Range<usize> {
        self.left_top.x .. self.left_top.x + self.width
    }

    pub fn y_range(&self) -> Range<usize> {
        self.left_top.y .. self.left_top.y + self.height
    }
}
