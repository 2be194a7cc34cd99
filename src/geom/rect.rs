//! Tile rectangles in absolute `(left, top, right, bottom)` form.

use serde::{Deserialize, Serialize};

use super::region::Region;

/// An axis-aligned, half-open tile rectangle in original-image coordinates.
///
/// Like the rest of the geometry types, construction does not enforce
/// `left <= right`; [`crate::validation`] reports malformed rectangles
/// instead of refusing to represent them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    /// Creates a rectangle from its four edges.
    #[inline]
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the width, or 0 for a malformed rectangle.
    #[inline]
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Returns the height, or 0 for a malformed rectangle.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Returns true if the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns true if the pixel at `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Returns true if the rectangle lies within a `width` x `height` canvas.
    #[inline]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }

    /// Converts to `(x, y, width, height)` form.
    #[inline]
    pub fn to_region(&self) -> Region {
        Region::new(
            i64::from(self.left),
            i64::from(self.top),
            i64::from(self.right) - i64::from(self.left),
            i64::from(self.bottom) - i64::from(self.top),
        )
    }

    /// Returns the four edges as a tuple.
    #[inline]
    pub fn to_tuple(&self) -> (u32, u32, u32, u32) {
        (self.left, self.top, self.right, self.bottom)
    }
}

impl From<(u32, u32, u32, u32)> for TileRect {
    fn from((left, top, right, bottom): (u32, u32, u32, u32)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl std::fmt::Debug for TileRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TileRect({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

// Serialized as a bare `[left, top, right, bottom]` array, the shape
// downstream coordinate consumers expect.
impl Serialize for TileRect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.left, self.top, self.right, self.bottom].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TileRect {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [left, top, right, bottom] = <[u32; 4]>::deserialize(deserializer)?;
        Ok(TileRect::new(left, top, right, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = TileRect::new(976, 0, 2000, 1024);
        assert_eq!(rect.width(), 1024);
        assert_eq!(rect.height(), 1024);
        assert_eq!(rect.area(), 1024 * 1024);
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_malformed_rect_is_empty() {
        let rect = TileRect::new(100, 0, 10, 50);
        assert_eq!(rect.width(), 0);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = TileRect::new(10, 20, 30, 40);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(29, 39));
        assert!(!rect.contains(30, 20));
        assert!(!rect.contains(10, 40));
    }

    #[test]
    fn test_to_region() {
        let region = TileRect::new(10, 20, 110, 220).to_region();
        assert_eq!(region, Region::new(10, 20, 100, 200));
    }

    #[test]
    fn test_serializes_as_array() {
        let rect = TileRect::new(0, 0, 800, 600);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, "[0,0,800,600]");

        let restored: TileRect = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, rect);
    }

    #[test]
    fn test_deserialize_rejects_wrong_arity() {
        assert!(serde_json::from_str::<TileRect>("[0,0,800]").is_err());
    }
}
