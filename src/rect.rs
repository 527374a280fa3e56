use derive_more::{Add, AddAssign, Display, From, Into, Sub};

/// A pixel coordinate on a canvas. `x` grows to the right and `y` grows downwards.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Add, AddAssign, Sub, Display, From, Into)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

/// An axis-aligned rectangle, specified by its top-left corner and its size.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[display("{width}x{height} at {origin}")]
pub struct Rect {
    /// The top-left corner of the rectangle
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            origin: Point { x, y },
            width,
            height,
        }
    }

    pub const fn x(&self) -> i32 {
        self.origin.x
    }

    pub const fn y(&self) -> i32 {
        self.origin.y
    }

    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    pub const fn top(&self) -> i32 {
        self.origin.y
    }

    /// The exclusive right edge, saturating at `i32::MAX`
    pub const fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.height)
    }

    /// `true` when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Move the rectangle without changing its size
    pub fn translate(&self, offset: Point) -> Rect {
        Rect {
            origin: self.origin + offset,
            ..*self
        }
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Rect::new(x, y, width, height)
    }
}
