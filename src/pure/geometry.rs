//! Geometry primitives
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// An x,y coordinate pair
///
/// Coordinates are signed as a window may be positioned partially off screen
/// (above or to the left of the root window origin).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// The x coordinate
    pub x: i32,
    /// The y coordinate
    pub y: i32,
}

impl Point {
    /// Create a new Point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point clamped into the signed 16 bit coordinate space used on the wire
    /// by the X protocol.
    pub fn as_wire(&self) -> (i16, i16) {
        fn clamp(v: i32) -> i16 {
            v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
        }

        (clamp(self.x), clamp(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

// A Rect converts to its top left corner
impl From<Rect> for Point {
    fn from(r: Rect) -> Self {
        let Rect { x, y, .. } = r;

        Self { x, y }
    }
}

/// An X window position: top left corner + extent
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect
    pub x: i32,
    /// The y-coordinate of the top left corner of this rect
    pub y: i32,
    /// The width of this rect
    pub w: u32,
    /// The height of this rect
    pub h: u32,
}

impl Rect {
    /// Create a new Rect.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }

    /// The midpoint of this rectangle.
    ///
    /// Odd side lengths will lead to a truncated point towards the top left corner
    /// in order to maintain integer coordinates.
    /// ```
    /// # use xembed_tray::pure::geometry::{Rect, Point};
    /// let r = Rect::new(10, 10, 100, 200);
    ///
    /// assert_eq!(r.midpoint(), Point { x: 60, y: 110 });
    /// ```
    pub fn midpoint(&self) -> Point {
        self.origin() + self.local_midpoint()
    }

    /// The midpoint of this rectangle relative to its own top left corner.
    ///
    /// This is the position of the centre of a window in that window's own coordinate
    /// space, regardless of where the window is placed.
    /// ```
    /// # use xembed_tray::pure::geometry::{Rect, Point};
    /// let r = Rect::new(10, 10, 24, 25);
    ///
    /// assert_eq!(r.local_midpoint(), Point { x: 12, y: 12 });
    /// ```
    pub fn local_midpoint(&self) -> Point {
        Point {
            x: (self.w / 2) as i32,
            y: (self.h / 2) as i32,
        }
    }

    /// The top left corner of this rectangle.
    pub fn origin(&self) -> Point {
        Point::from(*self)
    }
}
