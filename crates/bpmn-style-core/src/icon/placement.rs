//! Placement of a child icon relative to its outer rectangle.

use crate::geometry::{Bounds, Point, Size};

/// How one dimension of a placed icon is derived from the outer rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// An absolute length.
    Fixed(f64),
    /// A fraction of the outer length.
    Relative(f64),
    /// The outer length minus the given amount.
    Shrink(f64),
    /// A fraction of the smaller outer side; keeps glyphs square in
    /// non-square elements.
    MinSide(f64),
    /// The child's own preferred length, or the outer length when the child
    /// has none.
    Inherit,
}

impl Extent {
    fn resolve(self, outer: f64, min_side: f64, preferred: Option<f64>) -> f64 {
        let length = match self {
            Self::Fixed(value) => value,
            Self::Relative(ratio) => outer * ratio,
            Self::Shrink(amount) => outer - amount,
            Self::MinSide(ratio) => min_side * ratio,
            Self::Inherit => preferred.unwrap_or(outer),
        };
        length.max(0.0)
    }
}

/// Anchors a child rectangle to a point of the outer rectangle.
///
/// The child is positioned so that its `origin` (relative to its own size)
/// coincides with the outer rectangle's `anchor` (relative to the outer
/// size), then shifted by `offset`.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::{Bounds, Point, Size};
/// # use bpmn_style_core::icon::Placement;
/// let outer = Bounds::from_xywh(0.0, 0.0, 100.0, 60.0);
///
/// let type_icon = Placement::north_west(Point::new(5.0, 5.0), Size::new(16.0, 16.0));
/// assert_eq!(type_icon.resolve(outer, None), Bounds::from_xywh(5.0, 5.0, 16.0, 16.0));
///
/// let marker = Placement::south(5.0, Size::new(10.0, 10.0));
/// assert_eq!(marker.resolve(outer, None), Bounds::from_xywh(45.0, 45.0, 10.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    anchor: (f64, f64),
    origin: (f64, f64),
    offset: Point,
    width: Extent,
    height: Extent,
}

impl Placement {
    pub fn new(anchor: (f64, f64), origin: (f64, f64), width: Extent, height: Extent) -> Self {
        Self {
            anchor,
            origin,
            offset: Point::default(),
            width,
            height,
        }
    }

    /// Covers the whole outer rectangle.
    pub fn fill() -> Self {
        Self::new(
            (0.0, 0.0),
            (0.0, 0.0),
            Extent::Relative(1.0),
            Extent::Relative(1.0),
        )
    }

    /// Covers the outer rectangle shrunk by `amount` on every side.
    pub fn inset(amount: f64) -> Self {
        Self::new(
            (0.0, 0.0),
            (0.0, 0.0),
            Extent::Shrink(2.0 * amount),
            Extent::Shrink(2.0 * amount),
        )
        .with_offset(Point::new(amount, amount))
    }

    /// Centered in the outer rectangle.
    pub fn center(width: Extent, height: Extent) -> Self {
        Self::new((0.5, 0.5), (0.5, 0.5), width, height)
    }

    /// Top-left corner offset by `offset`, with a fixed size.
    pub fn north_west(offset: Point, size: Size) -> Self {
        Self::new(
            (0.0, 0.0),
            (0.0, 0.0),
            Extent::Fixed(size.width()),
            Extent::Fixed(size.height()),
        )
        .with_offset(offset)
    }

    /// Horizontally centered, `gap` above the bottom edge, with a fixed size.
    pub fn south(gap: f64, size: Size) -> Self {
        Self::south_with(gap, Extent::Fixed(size.width()), Extent::Fixed(size.height()))
    }

    /// Horizontally centered, `gap` above the bottom edge.
    pub fn south_with(gap: f64, width: Extent, height: Extent) -> Self {
        Self::new((0.5, 1.0), (0.5, 1.0), width, height).with_offset(Point::new(0.0, -gap))
    }

    /// Full-width band `offset` below the top edge.
    pub fn top_band(offset: f64, height: f64) -> Self {
        Self::new(
            (0.0, 0.0),
            (0.0, 0.0),
            Extent::Relative(1.0),
            Extent::Fixed(height),
        )
        .with_offset(Point::new(0.0, offset))
    }

    /// Full-width band `offset` above the bottom edge.
    pub fn bottom_band(offset: f64, height: f64) -> Self {
        Self::new(
            (0.0, 1.0),
            (0.0, 1.0),
            Extent::Relative(1.0),
            Extent::Fixed(height),
        )
        .with_offset(Point::new(0.0, -offset))
    }

    /// Full-height strip of the given thickness along the left edge.
    pub fn left_strip(thickness: f64) -> Self {
        Self::new(
            (0.0, 0.0),
            (0.0, 0.0),
            Extent::Fixed(thickness),
            Extent::Relative(1.0),
        )
    }

    /// Horizontally centered outside the top edge, `gap` away from it.
    pub fn above(gap: f64, size: Size) -> Self {
        Self::new(
            (0.5, 0.0),
            (0.5, 1.0),
            Extent::Fixed(size.width()),
            Extent::Fixed(size.height()),
        )
        .with_offset(Point::new(0.0, -gap))
    }

    /// Horizontally centered outside the bottom edge, `gap` away from it.
    pub fn below(gap: f64, size: Size) -> Self {
        Self::new(
            (0.5, 1.0),
            (0.5, 0.0),
            Extent::Fixed(size.width()),
            Extent::Fixed(size.height()),
        )
        .with_offset(Point::new(0.0, gap))
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Returns `true` if both extents are fixed lengths.
    pub fn fixed_size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Extent::Fixed(width), Extent::Fixed(height)) => {
                Some(Size::new(width.max(0.0), height.max(0.0)))
            }
            _ => None,
        }
    }

    /// Computes the child rectangle for the given outer rectangle.
    ///
    /// `preferred` is the child's own preferred size, consulted by
    /// [`Extent::Inherit`].
    pub fn resolve(&self, outer: Bounds, preferred: Option<Size>) -> Bounds {
        let outer = outer.normalized();
        let (outer_width, outer_height) = (outer.width(), outer.height());
        let min_side = outer_width.min(outer_height);

        let width = self
            .width
            .resolve(outer_width, min_side, preferred.map(Size::width));
        let height = self
            .height
            .resolve(outer_height, min_side, preferred.map(Size::height));

        let x = outer.min_x() + self.anchor.0 * outer_width - self.origin.0 * width
            + self.offset.x();
        let y = outer.min_y() + self.anchor.1 * outer_height - self.origin.1 * height
            + self.offset.y();
        Bounds::from_xywh(x, y, width, height)
    }
}
