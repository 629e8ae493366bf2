//! Path construction for element outlines and icon glyphs.
//!
//! Two kinds of builders live here:
//!
//! - [`UnitPath`]: an instruction list expressed in the unit square
//!   `[0,1] x [0,1]`, mapped onto arbitrary bounds with an affine transform.
//!   Glyphs are defined this way once and shared.
//! - Absolute outline builders ([`rounded_rectangle`], [`ellipse`],
//!   [`data_store`], ...) that depend on non-proportional parameters such as
//!   corner radii or fold sizes and are therefore computed directly in
//!   diagram coordinates.
//!
//! Every builder accepts degenerate bounds. Negative extents are clamped to
//! zero and radii, folds and arc heights shrink with the bounds, so the
//! produced coordinates are always finite.

use kurbo::{Affine, BezPath, PathEl};

use crate::geometry::{Bounds, Point, Side};

/// Control point distance factor approximating a quarter circle with a cubic.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Height of a data store's elliptic cap relative to the store height.
pub const DATA_STORE_CAP_RATIO: f64 = 0.125;

/// Control point factor for a single cubic approximating a half ellipse.
const HALF_ELLIPSE_FACTOR: f64 = 4.0 / 3.0;

/// One drawing instruction of a [`UnitPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

/// A path template in the unit square.
///
/// # Examples
///
/// ```
/// # use bpmn_style_core::geometry::Bounds;
/// # use bpmn_style_core::path::UnitPath;
/// let check = UnitPath::new().move_to(0.0, 0.5).line_to(0.4, 1.0).line_to(1.0, 0.0);
/// let path = check.to_path(Bounds::from_xywh(10.0, 10.0, 20.0, 20.0));
/// assert_eq!(path.elements().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitPath {
    commands: Vec<PathCommand>,
}

impl UnitPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo(cx, cy, x, y));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cubic_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.commands
            .push(PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Appends an open polyline through `points`.
    pub fn polyline(mut self, points: &[(f64, f64)]) -> Self {
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            self = self.move_to(x, y);
            for &(x, y) in iter {
                self = self.line_to(x, y);
            }
        }
        self
    }

    /// Appends a closed polygon through `points`.
    pub fn polygon(self, points: &[(f64, f64)]) -> Self {
        if points.is_empty() {
            return self;
        }
        self.polyline(points).close()
    }

    /// Appends an axis-aligned rectangle subpath.
    pub fn rect(self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.polygon(&[
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])
    }

    /// Appends an ellipse subpath made of four cubic arcs.
    pub fn ellipse(self, cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;
        self.move_to(cx + rx, cy)
            .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry)
            .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy)
            .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry)
            .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy)
            .close()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Maps the template onto `bounds`.
    pub fn to_path(&self, bounds: Bounds) -> BezPath {
        self.transformed(unit_transform(bounds))
    }

    /// Maps the template through an arbitrary affine transform.
    pub fn transformed(&self, affine: Affine) -> BezPath {
        let map = |x: f64, y: f64| affine * kurbo::Point::new(x, y);
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) => path.move_to(map(x, y)),
                PathCommand::LineTo(x, y) => path.line_to(map(x, y)),
                PathCommand::QuadTo(cx, cy, x, y) => path.quad_to(map(cx, cy), map(x, y)),
                PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                    path.curve_to(map(c1x, c1y), map(c2x, c2y), map(x, y))
                }
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }
}

/// Affine transform mapping the unit square onto `bounds`.
///
/// Negative extents are clamped to zero, collapsing the template onto the
/// bounds' minimum corner.
pub fn unit_transform(bounds: Bounds) -> Affine {
    let bounds = bounds.normalized();
    Affine::translate((bounds.min_x(), bounds.min_y()))
        * Affine::scale_non_uniform(bounds.width(), bounds.height())
}

/// Corner radii of a rounded rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CornerRadii {
    top_left: f64,
    top_right: f64,
    bottom_right: f64,
    bottom_left: f64,
}

impl CornerRadii {
    pub fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn uniform(radius: f64) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// Rounds only the two top corners.
    pub fn top(radius: f64) -> Self {
        Self::new(radius, radius, 0.0, 0.0)
    }

    /// Rounds only the two bottom corners.
    pub fn bottom(radius: f64) -> Self {
        Self::new(0.0, 0.0, radius, radius)
    }

    pub fn top_left(self) -> f64 {
        self.top_left
    }

    pub fn top_right(self) -> f64 {
        self.top_right
    }

    pub fn bottom_right(self) -> f64 {
        self.bottom_right
    }

    pub fn bottom_left(self) -> f64 {
        self.bottom_left
    }

    /// Clamps every radius into `[0, min(width, height) / 2]`.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            top_left: clamp_radius(self.top_left, width, height),
            top_right: clamp_radius(self.top_right, width, height),
            bottom_right: clamp_radius(self.bottom_right, width, height),
            bottom_left: clamp_radius(self.bottom_left, width, height),
        }
    }
}

/// Clamps a corner radius into `[0, min(width, height) / 2]`.
///
/// Non-finite radii collapse to zero.
pub fn clamp_radius(radius: f64, width: f64, height: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    let limit = (width.min(height) / 2.0).max(0.0);
    radius.min(limit)
}

pub fn rectangle(bounds: Bounds) -> BezPath {
    rounded_rectangle_corners(bounds, CornerRadii::default())
}

/// Rectangle with the same radius on every corner.
pub fn rounded_rectangle(bounds: Bounds, radius: f64) -> BezPath {
    rounded_rectangle_corners(bounds, CornerRadii::uniform(radius))
}

/// Rectangle with individually rounded corners, drawn clockwise from the
/// top-left corner.
pub fn rounded_rectangle_corners(bounds: Bounds, radii: CornerRadii) -> BezPath {
    let b = bounds.normalized();
    let (x0, y0, x1, y1) = (b.min_x(), b.min_y(), b.max_x(), b.max_y());
    let r = radii.clamped(b.width(), b.height());

    let mut path = BezPath::new();
    path.move_to((x0 + r.top_left, y0));
    path.line_to((x1 - r.top_right, y0));
    corner_to(&mut path, (x1, y0), (x1, y0 + r.top_right), r.top_right);
    path.line_to((x1, y1 - r.bottom_right));
    corner_to(&mut path, (x1, y1), (x1 - r.bottom_right, y1), r.bottom_right);
    path.line_to((x0 + r.bottom_left, y1));
    corner_to(&mut path, (x0, y1), (x0, y1 - r.bottom_left), r.bottom_left);
    path.line_to((x0, y0 + r.top_left));
    corner_to(&mut path, (x0, y0), (x0 + r.top_left, y0), r.top_left);
    path.close_path();
    path
}

/// Continues the path around `corner` to `end` with a quarter-circle cubic.
fn corner_to(path: &mut BezPath, corner: (f64, f64), end: (f64, f64), radius: f64) {
    if radius <= 0.0 {
        return;
    }
    let Some(start) = path.elements().last().and_then(|el| el.end_point()) else {
        return;
    };
    let c1 = kurbo::Point::new(
        start.x + (corner.0 - start.x) * KAPPA,
        start.y + (corner.1 - start.y) * KAPPA,
    );
    let c2 = kurbo::Point::new(
        end.0 + (corner.0 - end.0) * KAPPA,
        end.1 + (corner.1 - end.1) * KAPPA,
    );
    path.curve_to(c1, c2, kurbo::Point::from(end));
}

/// Ellipse inscribed in `bounds`.
pub fn ellipse(bounds: Bounds) -> BezPath {
    let b = bounds.normalized();
    let center = b.center();
    UnitPath::new()
        .ellipse(center.x(), center.y(), b.width() / 2.0, b.height() / 2.0)
        .transformed(Affine::IDENTITY)
}

/// Diamond touching the midpoints of the four sides.
pub fn diamond(bounds: Bounds) -> BezPath {
    let b = bounds.normalized();
    let c = b.center();
    polygon(&[
        (c.x(), b.min_y()),
        (b.max_x(), c.y()),
        (c.x(), b.max_y()),
        (b.min_x(), c.y()),
    ])
}

/// Horizontal hexagon with pointed left and right ends (conversation shape).
pub fn hexagon(bounds: Bounds) -> BezPath {
    let b = bounds.normalized();
    let cut = b.width() / 4.0;
    let cy = b.center().y();
    polygon(&[
        (b.min_x() + cut, b.min_y()),
        (b.max_x() - cut, b.min_y()),
        (b.max_x(), cy),
        (b.max_x() - cut, b.max_y()),
        (b.min_x() + cut, b.max_y()),
        (b.min_x(), cy),
    ])
}

fn clamp_fold(fold: f64, bounds: Bounds) -> f64 {
    if !fold.is_finite() || fold <= 0.0 {
        return 0.0;
    }
    fold.min(bounds.width()).min(bounds.height())
}

/// Page with a cut top-right corner (data object shape).
pub fn data_object(bounds: Bounds, fold: f64) -> BezPath {
    let b = bounds.normalized();
    let f = clamp_fold(fold, b);
    polygon(&[
        (b.min_x(), b.min_y()),
        (b.max_x() - f, b.min_y()),
        (b.max_x(), b.min_y() + f),
        (b.max_x(), b.max_y()),
        (b.min_x(), b.max_y()),
    ])
}

/// The folded-over corner drawn on top of [`data_object`].
pub fn data_object_fold(bounds: Bounds, fold: f64) -> BezPath {
    let b = bounds.normalized();
    let f = clamp_fold(fold, b);
    polyline(&[
        (b.max_x() - f, b.min_y()),
        (b.max_x() - f, b.min_y() + f),
        (b.max_x(), b.min_y() + f),
    ])
}

/// Height of the elliptic caps of a data store of the given height.
pub fn data_store_cap(height: f64) -> f64 {
    height.max(0.0) * DATA_STORE_CAP_RATIO
}

/// Cylinder outline: two cubic half-ellipse arcs joined by straight sides.
pub fn data_store(bounds: Bounds) -> BezPath {
    let b = bounds.normalized();
    let cap = data_store_cap(b.height());
    let bulge = cap * HALF_ELLIPSE_FACTOR;
    let (x0, x1) = (b.min_x(), b.max_x());
    let top = b.min_y() + cap;
    let bottom = b.max_y() - cap;

    let mut path = BezPath::new();
    path.move_to((x0, top));
    path.curve_to((x0, top - bulge), (x1, top - bulge), (x1, top));
    path.line_to((x1, bottom));
    path.curve_to((x1, bottom + bulge), (x0, bottom + bulge), (x0, bottom));
    path.close_path();
    path
}

/// Front half of the top cap of a data store, drawn on top of [`data_store`].
pub fn data_store_lip(bounds: Bounds) -> BezPath {
    let b = bounds.normalized();
    let cap = data_store_cap(b.height());
    let top = b.min_y() + cap;
    let bulge = cap * HALF_ELLIPSE_FACTOR;

    let mut path = BezPath::new();
    path.move_to((b.min_x(), top));
    path.curve_to((b.min_x(), top + bulge), (b.max_x(), top + bulge), (b.max_x(), top));
    path
}

/// Open bracket whose spine runs along `side` with arms of length `arm`.
pub fn bracket(bounds: Bounds, side: Side, arm: f64) -> BezPath {
    let b = bounds.normalized();
    let (x0, y0, x1, y1) = (b.min_x(), b.min_y(), b.max_x(), b.max_y());
    let arm_length = |extent: f64| {
        if arm.is_finite() {
            arm.clamp(0.0, extent)
        } else {
            0.0
        }
    };
    match side {
        Side::West => {
            let a = arm_length(b.width());
            polyline(&[(x0 + a, y0), (x0, y0), (x0, y1), (x0 + a, y1)])
        }
        Side::East => {
            let a = arm_length(b.width());
            polyline(&[(x1 - a, y0), (x1, y0), (x1, y1), (x1 - a, y1)])
        }
        Side::North => {
            let a = arm_length(b.height());
            polyline(&[(x0, y0 + a), (x0, y0), (x1, y0), (x1, y0 + a)])
        }
        Side::South => {
            let a = arm_length(b.height());
            polyline(&[(x0, y1 - a), (x0, y1), (x1, y1), (x1, y1 - a)])
        }
    }
}

/// Straight line between two points.
pub fn segment(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(kurbo::Point::from(from));
    path.line_to(kurbo::Point::from(to));
    path
}

/// Returns `true` if every point of the path is finite.
pub fn is_finite(path: &BezPath) -> bool {
    path.elements().iter().all(|element| match *element {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        PathEl::QuadTo(c, p) => c.is_finite() && p.is_finite(),
        PathEl::CurveTo(c1, c2, p) => c1.is_finite() && c2.is_finite() && p.is_finite(),
        PathEl::ClosePath => true,
    })
}

fn polyline(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &point in iter {
            path.line_to(point);
        }
    }
    path
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = polyline(points);
    if !points.is_empty() {
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use kurbo::Shape;

    use super::*;

    fn end_points(path: &BezPath) -> Vec<kurbo::Point> {
        path.elements()
            .iter()
            .filter_map(|element| element.end_point())
            .collect()
    }

    #[test]
    fn test_unit_path_maps_onto_bounds() {
        let template = UnitPath::new().move_to(0.0, 0.0).line_to(1.0, 1.0);
        let path = template.to_path(Bounds::from_xywh(10.0, 20.0, 30.0, 40.0));
        let points = end_points(&path);
        assert_eq!(points[0], kurbo::Point::new(10.0, 20.0));
        assert_eq!(points[1], kurbo::Point::new(40.0, 60.0));
    }

    #[test]
    fn test_unit_path_negative_bounds_collapse() {
        let template = UnitPath::new().rect(0.0, 0.0, 1.0, 1.0);
        let path = template.to_path(Bounds::new(5.0, 5.0, -5.0, -5.0));
        assert!(is_finite(&path));
        for point in end_points(&path) {
            assert_eq!(point, kurbo::Point::new(5.0, 5.0));
        }
    }

    #[test]
    fn test_polygon_of_no_points_is_empty() {
        assert!(UnitPath::new().polygon(&[]).is_empty());
    }

    #[test]
    fn test_clamp_radius() {
        assert_approx_eq!(f64, clamp_radius(10.0, 100.0, 60.0), 10.0);
        assert_approx_eq!(f64, clamp_radius(50.0, 100.0, 60.0), 30.0);
        assert_approx_eq!(f64, clamp_radius(-4.0, 100.0, 60.0), 0.0);
        assert_approx_eq!(f64, clamp_radius(f64::NAN, 100.0, 60.0), 0.0);
        assert_approx_eq!(f64, clamp_radius(5.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_rounded_rectangle_contains_center_not_corner() {
        let path = rounded_rectangle(Bounds::from_xywh(0.0, 0.0, 100.0, 60.0), 20.0);
        assert!(path.contains(kurbo::Point::new(50.0, 30.0)));
        assert!(!path.contains(kurbo::Point::new(1.0, 1.0)));
        assert!(path.contains(kurbo::Point::new(20.0, 1.0)));
    }

    #[test]
    fn test_rectangle_has_no_curves() {
        let path = rectangle(Bounds::from_xywh(0.0, 0.0, 10.0, 10.0));
        assert!(
            path.elements()
                .iter()
                .all(|element| !matches!(element, PathEl::CurveTo(..)))
        );
        assert!(path.contains(kurbo::Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_top_corner_radii_leave_bottom_square() {
        let path = rounded_rectangle_corners(
            Bounds::from_xywh(0.0, 0.0, 100.0, 20.0),
            CornerRadii::top(10.0),
        );
        assert!(path.contains(kurbo::Point::new(0.5, 19.5)));
        assert!(!path.contains(kurbo::Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_ellipse_extremes() {
        let path = ellipse(Bounds::from_xywh(0.0, 0.0, 40.0, 20.0));
        let bbox = path.bounding_box();
        assert_approx_eq!(f64, bbox.x0, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bbox.x1, 40.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bbox.y0, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bbox.y1, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_diamond_vertices() {
        let path = diamond(Bounds::from_xywh(0.0, 0.0, 50.0, 50.0));
        let points = end_points(&path);
        assert_eq!(points[0], kurbo::Point::new(25.0, 0.0));
        assert_eq!(points[1], kurbo::Point::new(50.0, 25.0));
        assert!(!path.contains(kurbo::Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_data_object_fold_is_clamped() {
        let path = data_object(Bounds::from_xywh(0.0, 0.0, 6.0, 30.0), 15.0);
        let points = end_points(&path);
        // fold clamped to the width
        assert_eq!(points[1], kurbo::Point::new(0.0, 0.0));
        assert_eq!(points[2], kurbo::Point::new(6.0, 6.0));
    }

    #[test]
    fn test_data_store_caps_stay_inside_bounds() {
        let bounds = Bounds::from_xywh(0.0, 0.0, 50.0, 40.0);
        let bbox = data_store(bounds).bounding_box();
        assert_approx_eq!(f64, bbox.y0, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bbox.y1, 40.0, epsilon = 1e-9);

        let lip = data_store_lip(bounds).bounding_box();
        assert_approx_eq!(f64, lip.y1, 2.0 * data_store_cap(40.0), epsilon = 1e-9);
    }

    #[test]
    fn test_bracket_spine_side() {
        let path = bracket(Bounds::from_xywh(0.0, 0.0, 20.0, 40.0), Side::West, 8.0);
        let points = end_points(&path);
        assert_eq!(points.first(), Some(&kurbo::Point::new(8.0, 0.0)));
        assert_eq!(points.last(), Some(&kurbo::Point::new(8.0, 40.0)));

        let east = bracket(Bounds::from_xywh(0.0, 0.0, 20.0, 40.0), Side::East, 50.0);
        assert_eq!(end_points(&east)[0], kurbo::Point::new(0.0, 0.0));
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let path = segment(Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0));
        assert!(!is_finite(&path));
    }
}
