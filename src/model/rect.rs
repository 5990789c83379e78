//! Layout primitives: points, sizes and axis-aligned rectangles

use serde::{Deserialize, Serialize};

use crate::error::{DockError, DockResult};

/// A point in host coordinates (logical pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edge coordinates, clamping inverted edges to zero size
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Exclusive upper bounds, matching pixel hit-testing
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// True if the interiors overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region, or an empty rect at the origin of `self`
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        Rect::from_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// A rect of `size` centred on `centre`
    pub fn centred_at(centre: Point, size: Size) -> Rect {
        Rect::new(
            centre.x - size.width / 2.0,
            centre.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Axis-aligned difference `self - other`.
    ///
    /// `other` must span `self` completely along one axis so that the result
    /// is still a rectangle. A subtrahend that would leave a hole or an
    /// L-shape is rejected with `DockError::NonRectangularSubtraction`.
    pub fn subtract(&self, other: &Rect) -> DockResult<Rect> {
        if !self.intersects(other) {
            return Ok(*self);
        }

        let spans_vertically = other.top() <= self.top() && other.bottom() >= self.bottom();
        let spans_horizontally = other.left() <= self.left() && other.right() >= self.right();

        if spans_vertically {
            if other.left() <= self.left() {
                let left = other.right().min(self.right());
                return Ok(Rect::from_ltrb(left, self.top(), self.right(), self.bottom()));
            }
            if other.right() >= self.right() {
                let right = other.left().max(self.left());
                return Ok(Rect::from_ltrb(self.left(), self.top(), right, self.bottom()));
            }
        }

        if spans_horizontally {
            if other.top() <= self.top() {
                let top = other.bottom().min(self.bottom());
                return Ok(Rect::from_ltrb(self.left(), top, self.right(), self.bottom()));
            }
            if other.bottom() >= self.bottom() {
                let bottom = other.top().max(self.top());
                return Ok(Rect::from_ltrb(self.left(), self.top(), self.right(), bottom));
            }
        }

        Err(DockError::NonRectangularSubtraction)
    }
}
