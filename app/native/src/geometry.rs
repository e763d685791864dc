//! Pixel geometry shared by displays, windows and surfaces.
//!
//! All values are whole pixels in the host's screen coordinate space
//! (top-left origin, y growing downwards).

use serde::{Deserialize, Serialize};

/// A point in screen or window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }

    /// Component-wise maximum of two sizes.
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        Self {
            width: if self.width > other.width { self.width } else { other.width },
            height: if self.height > other.height { self.height } else { other.height },
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `800x600`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
        let width = w.trim().parse::<i32>().map_err(|e| format!("invalid width `{w}`: {e}"))?;
        let height = h.trim().parse::<i32>().map_err(|e| format!("invalid height `{h}`: {e}"))?;
        if width <= 0 || height <= 0 {
            return Err(format!("size must be positive, got {width}x{height}"));
        }
        Ok(Self::new(width, height))
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from origin point and size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }
}

/// Space taken by window decorations on each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    /// Top edge (title bar on most platforms).
    pub top: i32,
    /// Left edge.
    pub left: i32,
    /// Bottom edge.
    pub bottom: i32,
    /// Right edge.
    pub right: i32,
}

impl Insets {
    /// Creates new insets.
    #[must_use]
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Top-left corner of the content area, relative to the window origin.
    #[must_use]
    pub const fn content_origin(&self) -> Point { Point::new(self.left, self.top) }
}
