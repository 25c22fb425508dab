//! Integer-pixel geometry: axes, directions, rects and the CSS-like box model.
//!
//! Everything here is pure and free of any arena/tree state: a [`Rect`] doesn't know which
//! node it belongs to, and a [`BoxGeom`] doesn't know where its containing [`Perimeter`]s came
//! from. The tree module is what ties geometry to node identity.

use std::fmt;

/// One of the two axes a [`SplitContainer`](crate::node::SplitContainerNode) lays its children
/// along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis.
    pub fn inv(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// A cardinal direction used for spatial navigation and resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The opposite direction.
    pub fn inv(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The axis this direction moves along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// +1 if this direction moves towards increasing coordinates, -1 otherwise.
    pub fn axis_unit(self) -> i32 {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }
}

/// An axis-aligned integer-pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn x2(&self) -> i32 {
        self.x + self.w
    }

    pub fn y2(&self) -> i32 {
        self.y + self.h
    }

    /// The coordinate of this rect's near edge along `axis`.
    pub fn coord(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// The coordinate of this rect's far edge along `axis`.
    pub fn coord2(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x2(),
            Axis::Y => self.y2(),
        }
    }

    /// This rect's extent along `axis`.
    pub fn dim(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
        }
    }

    pub fn set_coord(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    pub fn set_dim(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::X => self.w = value,
            Axis::Y => self.h = value,
        }
    }

    /// True if `(x, y)` lies within `[x1, x2) x [y1, y2)`.
    pub fn has_coord(&self, x: i32, y: i32) -> bool {
        (self.x..self.x2()).contains(&x) && (self.y..self.y2()).contains(&y)
    }

    /// Splits this rect along `axis` at `ratio`: the first part gets `round(dim * ratio)`, the
    /// second gets the remainder. The two parts abut exactly, with no gap or overlap.
    pub fn split(&self, axis: Axis, ratio: f64) -> (Rect, Rect) {
        let dim = self.dim(axis);
        let first_dim = (f64::from(dim) * ratio).round() as i32;
        let second_dim = dim - first_dim;

        let mut first = *self;
        first.set_dim(axis, first_dim);

        let mut second = *self;
        second.set_coord(axis, self.coord(axis) + first_dim);
        second.set_dim(axis, second_dim);

        (first, second)
    }

    /// The smallest rect enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.x2().max(other.x2());
        let y2 = self.y2().max(other.y2());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Whether this rect's projection on `axis` strictly overlaps `other`'s — i.e. they share at
    /// least one pixel of border along that axis. Navigation's adjacency filter calls this with
    /// the *inverse* of the direction's axis, since two panes are border-adjacent when their
    /// extents line up crosswise to the direction of travel.
    pub fn overlaps_on(&self, axis: Axis, other: &Rect) -> bool {
        let (a1, a2) = (self.coord(axis), self.coord2(axis));
        let (b1, b2) = (other.coord(axis), other.coord2(axis));
        a1 < b2 && b1 < a2
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}, w: {}, h: {}}}", self.x, self.y, self.w, self.h)
    }
}

/// A four-sided size, used independently for margin, border and padding on a [`BoxGeom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perimeter {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Perimeter {
    /// The same size on all four sides.
    pub fn uniform(size: i32) -> Perimeter {
        Perimeter { top: size, right: size, bottom: size, left: size }
    }

    /// Combined size along `axis` (the two sides perpendicular to it).
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.left + self.right,
            Axis::Y => self.top + self.bottom,
        }
    }

    fn inset(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.top,
            rect.w - self.left - self.right,
            rect.h - self.top - self.bottom,
        )
    }

    fn outset(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            rect.w + self.left + self.right,
            rect.h + self.top + self.bottom,
        )
    }
}

/// A CSS-like concentric box: `content_rect ⊂ padding_rect ⊂ border_rect ⊂ margin_rect`.
///
/// The outermost rect (`margin_rect`, aka `principal_rect`) is the one a node is actually laid
/// out at; the inner rects are derived from it by insetting with the configured perimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxGeom {
    pub margin: Perimeter,
    pub border: Perimeter,
    pub padding: Perimeter,
    principal_rect: Rect,
}

impl BoxGeom {
    pub fn new(margin: Perimeter, border: Perimeter, padding: Perimeter, principal_rect: Rect) -> BoxGeom {
        BoxGeom { margin, border, padding, principal_rect }
    }

    /// The node's outermost occupied space. All geometric operations (split, resize, navigation)
    /// work in terms of this rect.
    pub fn principal_rect(&self) -> Rect {
        self.principal_rect
    }

    pub fn set_principal_rect(&mut self, rect: Rect) {
        self.principal_rect = rect;
    }

    pub fn margin_rect(&self) -> Rect {
        self.principal_rect
    }

    pub fn border_rect(&self) -> Rect {
        self.margin.inset(self.margin_rect())
    }

    pub fn padding_rect(&self) -> Rect {
        self.border.inset(self.border_rect())
    }

    pub fn content_rect(&self) -> Rect {
        self.padding.inset(self.padding_rect())
    }

    /// Rebuilds `principal_rect` from a desired `content_rect`, offsetting outward by the
    /// configured perimeters. The inverse of `content_rect()`.
    pub fn set_content_rect(&mut self, content_rect: Rect) {
        let padding_rect = self.padding.outset(content_rect);
        let border_rect = self.border.outset(padding_rect);
        self.principal_rect = self.margin.outset(border_rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_abuts_with_no_gap_or_overlap() {
        let rect = Rect::new(0, 0, 100, 100);
        let (r1, r2) = rect.split(Axis::X, 0.5);
        assert_eq!(r1, Rect::new(0, 0, 50, 100));
        assert_eq!(r2, Rect::new(50, 0, 50, 100));
        assert_eq!(r1.x2(), r2.x);
    }

    #[test]
    fn split_rounds_and_remainder_fills_the_rest() {
        let rect = Rect::new(0, 0, 100, 100);
        let (r1, r2) = rect.split(Axis::X, 0.333);
        assert_eq!(r1.w, 33);
        assert_eq!(r2.w, 67);
        assert_eq!(r1.w + r2.w, rect.w);
    }

    #[test]
    fn union_encloses_both() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn box_round_trips_content_rect() {
        let mut box_ = BoxGeom::new(
            Perimeter::uniform(1),
            Perimeter::uniform(2),
            Perimeter::uniform(3),
            Rect::default(),
        );
        box_.set_content_rect(Rect::new(10, 10, 100, 100));
        assert_eq!(box_.content_rect(), Rect::new(10, 10, 100, 100));
        // principal_rect grows outward by margin+border+padding on every side.
        assert_eq!(box_.principal_rect(), Rect::new(4, 4, 112, 112));
    }

    #[test]
    fn overlaps_on_requires_shared_pixel() {
        let a = Rect::new(0, 0, 10, 10);
        // Directly below `a`, sharing its x-range: adjacent for a `down` move.
        let below = Rect::new(0, 10, 10, 10);
        assert!(a.overlaps_on(Axis::X, &below));
        // Shifted fully past `a` on x: no shared border even though y-ranges could align.
        let past = Rect::new(20, 10, 10, 10);
        assert!(!a.overlaps_on(Axis::X, &past));
    }
}
