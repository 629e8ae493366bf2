//! Geometric primitives for element styles.
//!
//! This module provides the value types every style computation is expressed
//! in: positions, sizes, rectangles, padding and the oriented rectangles that
//! label models hand back to their callers.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//! - [`Side`] - One of the four sides of a rectangle
//! - [`OrientedRect`] - A rectangle with a quarter-turn orientation
//!
//! # Coordinate System
//!
//! Coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Bounds are allowed to be degenerate (zero or negative extent). Consumers
//! that build paths clamp extents with [`Bounds::normalized`] instead of
//! rejecting them.

use serde::Deserialize;

/// A 2D point representing a position in diagram coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for kurbo::Point {
    fn from(point: Point) -> Self {
        kurbo::Point::new(point.x, point.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(point: kurbo::Point) -> Self {
        Point::new(point.x, point.y)
    }
}

/// A two-dimensional size with width and height.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::Size;
/// let marker = Size::square(10.0);
/// let cell = marker.max(Size::new(4.0, 30.0));
/// assert_eq!(cell.width(), 10.0);
/// assert_eq!(cell.height(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size with the specified width and height
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Creates a square size
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Returns the width
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f64 {
        self.height
    }

    /// Creates a new size with the specified width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Returns `true` if either dimension is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns the component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns the smaller of the two dimensions.
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Swaps width and height.
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// An axis-aligned rectangle defined by its minimum and maximum corners.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::{Bounds, Point};
/// let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);
/// assert_eq!(layout.center(), Point::new(50.0, 40.0));
/// assert!(layout.contains(Point::new(10.0, 10.0)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit minimum and maximum coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds of the given size centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width() / 2.0;
        let half_height = size.height() / 2.0;
        Self {
            min_x: center.x() - half_width,
            min_y: center.y() - half_height,
            max_x: center.x() + half_width,
            max_y: center.y() + half_height,
        }
    }

    /// Shorthand for `x, y, width, height` construction.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn min_x(self) -> f64 {
        self.min_x
    }

    pub fn min_y(self) -> f64 {
        self.min_y
    }

    pub fn max_x(self) -> f64 {
        self.max_x
    }

    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Width of the bounds. Negative for inverted bounds.
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounds. Negative for inverted bounds.
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `true` if the bounds enclose no area.
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Returns bounds with the same origin whose extents are clamped to be
    /// non-negative.
    pub fn normalized(self) -> Self {
        Self {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x.max(self.min_x),
            max_y: self.max_y.max(self.min_y),
        }
    }

    /// Returns the smallest bounds that contain both rectangles.
    pub fn merge(self, other: Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the given offset.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x(),
            min_y: self.min_y + offset.y(),
            max_x: self.max_x + offset.x(),
            max_y: self.max_y + offset.y(),
        }
    }

    /// Grows the bounds outward by the given insets.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Shrinks the bounds inward by the given insets.
    ///
    /// The result never inverts: when the insets are larger than the bounds
    /// the result collapses onto the shrunk minimum corner.
    pub fn inset_by(self, insets: Insets) -> Self {
        let min_x = self.min_x + insets.left();
        let min_y = self.min_y + insets.top();
        Self {
            min_x,
            min_y,
            max_x: (self.max_x - insets.right()).max(min_x),
            max_y: (self.max_y - insets.bottom()).max(min_y),
        }
    }

    /// Grows the bounds by `amount` on every side.
    pub fn expand(self, amount: f64) -> Self {
        self.add_padding(Insets::uniform(amount))
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    /// Returns `true` if every coordinate is a finite number.
    pub fn is_finite(self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Padding values for the four sides of a rectangle.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::Insets;
/// let base = Insets::uniform(5.0);
/// let with_band = base.with_top(base.top() + 20.0);
/// assert_eq!(with_band.top(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Insets {
    #[serde(default)]
    top: f64,
    #[serde(default)]
    right: f64,
    #[serde(default)]
    bottom: f64,
    #[serde(default)]
    left: f64,
}

impl Insets {
    /// Creates insets in CSS order: top, right, bottom, left.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f64 {
        self.top
    }

    pub fn right(self) -> f64 {
        self.right
    }

    pub fn bottom(self) -> f64 {
        self.bottom
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn with_top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn with_left(mut self, left: f64) -> Self {
        self.left = left;
        self
    }

    /// Side-wise sum of two insets.
    pub fn add(self, other: Insets) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }

    /// Returns the inset of the given side.
    pub fn side(self, side: Side) -> f64 {
        match side {
            Side::North => self.top,
            Side::East => self.right,
            Side::South => self.bottom,
            Side::West => self.left,
        }
    }
}

/// One of the four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// Returns the side facing this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Quarter-turn orientation of an [`OrientedRect`].
///
/// The rotation describes how the rectangle's unrotated content (typically
/// text) is turned around its center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Content reads left to right.
    #[default]
    None,
    /// Turned 90° clockwise: content reads top to bottom.
    Clockwise,
    /// Turned 180°.
    Half,
    /// Turned 90° counter-clockwise: content reads bottom to top.
    CounterClockwise,
}

impl Rotation {
    /// Rotation angle in degrees, clockwise positive (SVG convention).
    pub fn degrees(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Clockwise => 90.0,
            Self::Half => 180.0,
            Self::CounterClockwise => -90.0,
        }
    }

    /// Returns `true` if the rotation swaps width and height.
    fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Clockwise | Self::CounterClockwise)
    }
}

/// A rectangle with a quarter-turn orientation, used for label geometry.
///
/// The `size` is the unrotated size of the content. [`OrientedRect::bounds`]
/// returns the axis-aligned box the rotated content occupies.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::{OrientedRect, Point, Rotation, Size};
/// let header = OrientedRect::new(Point::new(10.0, 50.0), Size::new(60.0, 12.0), Rotation::CounterClockwise);
/// let bounds = header.bounds();
/// assert_eq!(bounds.width(), 12.0);
/// assert_eq!(bounds.height(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientedRect {
    center: Point,
    size: Size,
    rotation: Rotation,
}

impl OrientedRect {
    pub fn new(center: Point, size: Size, rotation: Rotation) -> Self {
        Self {
            center,
            size,
            rotation,
        }
    }

    /// Creates an unrotated rectangle of the given size centered in `bounds`.
    pub fn centered_in(bounds: Bounds, size: Size) -> Self {
        Self::new(bounds.center(), size, Rotation::None)
    }

    /// A zero-size rectangle at `center`.
    pub fn empty_at(center: Point) -> Self {
        Self::new(center, Size::default(), Rotation::None)
    }

    pub fn center(self) -> Point {
        self.center
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn rotation(self) -> Rotation {
        self.rotation
    }

    /// Returns `true` if the rectangle has no area.
    pub fn is_empty(self) -> bool {
        self.size.is_empty()
    }

    /// Axis-aligned bounds of the rotated rectangle.
    pub fn bounds(self) -> Bounds {
        let size = if self.rotation.is_quarter_turn() {
            self.size.transpose()
        } else {
            self.size
        };
        Bounds::new_from_center(self.center, size)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_kurbo_conversion() {
        let point = Point::new(1.5, -2.0);
        let converted: kurbo::Point = point.into();
        assert_eq!(Point::from(converted), point);
    }

    #[test]
    fn test_size_max_and_emptiness() {
        let a = Size::new(10.0, 20.0);
        let b = Size::new(5.0, 30.0);
        assert_eq!(a.max(b), Size::new(10.0, 30.0));
        assert_eq!(a.transpose(), Size::new(20.0, 10.0));
        assert!(Size::new(0.0, 5.0).is_empty());
    }

    #[test]
    fn test_bounds_from_xywh() {
        let bounds = Bounds::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_approx_eq!(f64, bounds.min_x(), 10.0);
        assert_approx_eq!(f64, bounds.max_y(), 70.0);
        assert_approx_eq!(f64, bounds.width(), 100.0);
        assert_approx_eq!(f64, bounds.height(), 50.0);
    }

    #[test]
    fn test_bounds_normalized_clamps_negative_extent() {
        let inverted = Bounds::new(10.0, 10.0, 5.0, 2.0);
        let normalized = inverted.normalized();
        assert_approx_eq!(f64, normalized.width(), 0.0);
        assert_approx_eq!(f64, normalized.height(), 0.0);
        assert_approx_eq!(f64, normalized.min_x(), 10.0);
        assert_approx_eq!(f64, normalized.min_y(), 10.0);
    }

    #[test]
    fn test_bounds_inset_never_inverts() {
        let bounds = Bounds::from_xywh(0.0, 0.0, 10.0, 10.0);
        let shrunk = bounds.inset_by(Insets::uniform(20.0));
        assert!(shrunk.width() >= 0.0);
        assert!(shrunk.height() >= 0.0);
    }

    #[test]
    fn test_bounds_padding_roundtrip() {
        let bounds = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);
        let insets = Insets::new(20.0, 5.0, 10.0, 5.0);
        assert_eq!(bounds.add_padding(insets).inset_by(insets), bounds);
    }

    #[test]
    fn test_bounds_finiteness() {
        assert!(Bounds::from_xywh(0.0, 0.0, 10.0, 10.0).is_finite());
        assert!(!Bounds::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
        assert!(!Bounds::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn test_insets_add() {
        let sum = Insets::uniform(5.0).add(Insets::new(20.0, 0.0, 32.0, 0.0));
        assert_eq!(sum, Insets::new(25.0, 5.0, 37.0, 5.0));
        assert_approx_eq!(f64, sum.side(Side::South), 37.0);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::North.opposite(), Side::South);
        assert_eq!(Side::West.opposite(), Side::East);
    }

    #[test]
    fn test_oriented_rect_bounds_unrotated() {
        let rect = OrientedRect::new(Point::new(50.0, 50.0), Size::new(40.0, 10.0), Rotation::None);
        assert_eq!(rect.bounds(), Bounds::from_xywh(30.0, 45.0, 40.0, 10.0));
    }

    #[test]
    fn test_oriented_rect_quarter_turn_swaps_extent() {
        let rect = OrientedRect::new(
            Point::new(10.0, 50.0),
            Size::new(60.0, 12.0),
            Rotation::CounterClockwise,
        );
        assert_eq!(rect.bounds(), Bounds::from_xywh(4.0, 20.0, 12.0, 60.0));
        assert_approx_eq!(f64, rect.rotation().degrees(), -90.0);
    }

    #[test]
    fn test_oriented_rect_empty() {
        let rect = OrientedRect::empty_at(Point::new(3.0, 4.0));
        assert!(rect.is_empty());
        assert_eq!(rect.bounds().center(), Point::new(3.0, 4.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            0.0f64..500.0,
            0.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::from_xywh(x, y, w, h))
    }

    fn insets_strategy() -> impl Strategy<Value = Insets> {
        (0.0f64..50.0, 0.0f64..50.0, 0.0f64..50.0, 0.0f64..50.0)
            .prop_map(|(t, r, b, l)| Insets::new(t, r, b, l))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Merged bounds contain both inputs.
    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(b2);
        let corners = [
            Point::new(b1.min_x(), b1.min_y()),
            Point::new(b1.max_x(), b1.max_y()),
            Point::new(b2.min_x(), b2.min_y()),
            Point::new(b2.max_x(), b2.max_y()),
        ];
        for corner in corners {
            prop_assert!(merged.contains(corner));
        }
        Ok(())
    }

    /// Shrinking by insets never produces negative extents.
    fn check_inset_non_negative(bounds: Bounds, insets: Insets) -> Result<(), TestCaseError> {
        let shrunk = bounds.inset_by(insets);
        prop_assert!(shrunk.width() >= 0.0);
        prop_assert!(shrunk.height() >= 0.0);
        Ok(())
    }

    /// Oriented bounds keep the area of the unrotated size.
    fn check_oriented_bounds_area(
        center: Point,
        bounds: Bounds,
    ) -> Result<(), TestCaseError> {
        let size = bounds.to_size();
        for rotation in [
            Rotation::None,
            Rotation::Clockwise,
            Rotation::Half,
            Rotation::CounterClockwise,
        ] {
            let rect = OrientedRect::new(center, size, rotation);
            let rotated = rect.bounds();
            prop_assert!(approx_eq!(
                f64,
                rotated.width() * rotated.height(),
                size.width() * size.height(),
                epsilon = 1e-6
            ));
            prop_assert!(approx_eq!(f64, rotated.center().x(), center.x(), epsilon = 1e-9));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }

        #[test]
        fn inset_non_negative(bounds in bounds_strategy(), insets in insets_strategy()) {
            check_inset_non_negative(bounds, insets)?;
        }

        #[test]
        fn oriented_bounds_area(center in point_strategy(), bounds in bounds_strategy()) {
            check_oriented_bounds_area(center, bounds)?;
        }
    }
}
