//! SVG render backend.
//!
//! Every leaf becomes one `<path>` element. Updates rewrite the `d`
//! attribute of the existing element.

use std::fmt::Write as _;

use kurbo::{BezPath, PathEl};
use log::trace;
use svg::{Node as _, node::element as svg_element};

use crate::{
    apply_stroke,
    draw::SvgNode,
    geometry::Bounds,
    icon::LeafIcon,
    render::{IconVisual, RenderContext},
};

/// Renders leaves as SVG `<path>` elements and counts the work done.
#[derive(Debug, Default)]
pub struct SvgContext {
    created: usize,
    updated: usize,
}

impl SvgContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaf elements created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of leaf elements updated in place so far.
    pub fn updated(&self) -> usize {
        self.updated
    }
}

impl RenderContext for SvgContext {
    type Visual = svg_element::Path;

    fn create_leaf(&mut self, leaf: &LeafIcon, bounds: Bounds) -> Self::Visual {
        self.created += 1;
        leaf_element(leaf, bounds)
    }

    fn update_leaf(
        &mut self,
        leaf: &LeafIcon,
        bounds: Bounds,
        mut previous: Self::Visual,
    ) -> Self::Visual {
        self.updated += 1;
        previous.assign("d", path_data(&leaf.path(bounds)));
        previous
    }
}

fn leaf_element(leaf: &LeafIcon, bounds: Bounds) -> svg_element::Path {
    let paint = leaf.paint();
    let mut element = svg_element::Path::new().set("d", path_data(&leaf.path(bounds)));

    element = match paint.fill() {
        Some(fill) => element
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha()),
        None => element.set("fill", "none"),
    };

    match paint.stroke() {
        Some(stroke) => apply_stroke!(element, stroke),
        None => element.set("stroke", "none"),
    }
}

/// Formats a path as SVG path data with coordinates rounded to three
/// decimals.
///
/// ```
/// # use bpmn_style_core::render::svg::path_data;
/// let mut path = kurbo::BezPath::new();
/// path.move_to((0.0, 0.0));
/// path.line_to((10.5, 1.0 / 3.0));
/// path.close_path();
/// assert_eq!(path_data(&path), "M0,0 L10.5,0.333 Z");
/// ```
pub fn path_data(path: &BezPath) -> String {
    let mut data = String::new();
    for element in path.elements() {
        if !data.is_empty() {
            data.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match *element {
            PathEl::MoveTo(p) => write!(data, "M{},{}", round(p.x), round(p.y)),
            PathEl::LineTo(p) => write!(data, "L{},{}", round(p.x), round(p.y)),
            PathEl::QuadTo(c, p) => write!(
                data,
                "Q{},{} {},{}",
                round(c.x),
                round(c.y),
                round(p.x),
                round(p.y)
            ),
            PathEl::CurveTo(c1, c2, p) => write!(
                data,
                "C{},{} {},{} {},{}",
                round(c1.x),
                round(c1.y),
                round(c2.x),
                round(c2.y),
                round(p.x),
                round(p.y)
            ),
            PathEl::ClosePath => write!(data, "Z"),
        };
    }
    data
}

fn round(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid printing "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

impl IconVisual<svg_element::Path> {
    /// Converts the retained tree into an SVG node. Groups become `<g>`
    /// elements.
    pub fn to_svg_node(&self) -> SvgNode {
        match self {
            Self::Leaf(path) => Box::new(path.clone()),
            Self::Group(children) => {
                trace!(children = children.len(); "Emitting icon group");
                let group = children
                    .iter()
                    .fold(svg_element::Group::new(), |group, child| {
                        group.add(child.to_svg_node())
                    });
                Box::new(group)
            }
        }
    }
}
