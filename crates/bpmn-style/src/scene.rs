//! A small host scene that drives the styles.
//!
//! A [`Scene`] keeps element styles keyed by [`Id`] in insertion order,
//! together with their layout rectangles and labels. It answers hit tests,
//! computes the painted area and renders itself to an SVG document, reusing
//! node visuals from the previous render where the styles allow it.

use indexmap::IndexMap;
use log::{debug, info, trace};
use svg::node::{Text as SvgText, element as svg_element};

use bpmn_style_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, SvgNode},
    geometry::{Bounds, Insets, OrientedRect, Point, Rotation, Size},
    identifier::Id,
    render::svg::{SvgContext, path_data},
};

use crate::{
    error::StyleError,
    label::{ConnectorLabelKind, ConnectorLabelStyle, LabelParameter},
    render::{RenderUpdate, RenderedNode, create_node_visual, update_node_visual},
    style::{ElementStyle, HitTestContext, NodeStyle},
};

/// Approximate advance of one character of label text.
pub const CHAR_WIDTH: f64 = 7.0;
/// Height of one line of label text.
pub const LINE_HEIGHT: f64 = 16.0;
/// Font size of label text.
const FONT_SIZE: f64 = 12.0;
/// Space around the painted area of a rendered document.
const DOCUMENT_MARGIN: f64 = 20.0;

/// Estimates the size of `text` laid out in lines of fixed-width characters.
///
/// ```
/// # use bpmn_style::scene::estimate_text_size;
/// # use bpmn_style_core::geometry::Size;
/// assert_eq!(estimate_text_size("Buyer"), Size::new(35.0, 16.0));
/// assert_eq!(estimate_text_size("Ship\norder"), Size::new(35.0, 32.0));
/// ```
pub fn estimate_text_size(text: &str) -> Size {
    let (lines, longest) = text
        .lines()
        .fold((0usize, 0usize), |(lines, longest), line| {
            (lines + 1, longest.max(line.chars().count()))
        });
    Size::new(longest as f64 * CHAR_WIDTH, lines as f64 * LINE_HEIGHT)
}

/// A label attached to a scene node.
#[derive(Debug, Clone)]
pub enum SceneLabel {
    /// Placed inside a band of its owner.
    Band {
        parameter: LabelParameter,
        text: String,
    },
    /// Floating beside its owner, joined to it by a connector.
    Connector {
        style: ConnectorLabelStyle,
        text: String,
        bounds: Bounds,
    },
}

impl SceneLabel {
    pub fn text(&self) -> &str {
        match self {
            Self::Band { text, .. } | Self::Connector { text, .. } => text,
        }
    }

    /// Area the label occupies for an owner laid out at `layout`.
    fn bounds(&self, owner: &NodeStyle, layout: Bounds) -> Bounds {
        match self {
            Self::Band { parameter, text } => parameter
                .geometry(estimate_text_size(text), owner, layout)
                .bounds(),
            Self::Connector { bounds, .. } => *bounds,
        }
    }
}

/// One element of a scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    style: NodeStyle,
    layout: Bounds,
    labels: Vec<SceneLabel>,
}

impl SceneNode {
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn layout(&self) -> Bounds {
        self.layout
    }

    pub fn labels(&self) -> &[SceneLabel] {
        &self.labels
    }

    /// Area painted by the node and all of its labels.
    pub fn bounds(&self) -> Bounds {
        self.labels
            .iter()
            .map(|label| label.bounds(&self.style, self.layout))
            .filter(|bounds| !bounds.is_empty())
            .fold(self.style.bounds(self.layout), Bounds::merge)
    }
}

/// Counts of the decisions taken by one [`Scene::render_svg`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub reused: usize,
    pub rearranged: usize,
    pub rebuilt: usize,
}

impl RenderStats {
    fn record(&mut self, update: RenderUpdate) {
        match update {
            RenderUpdate::Reused => self.reused += 1,
            RenderUpdate::Rearranged => self.rearranged += 1,
            RenderUpdate::Rebuilt => self.rebuilt += 1,
        }
    }
}

/// Element styles with their layouts and labels, in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: IndexMap<Id, SceneNode>,
    rendered: IndexMap<Id, RenderedNode<svg_element::Path>>,
    hit_test: HitTestContext,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene whose hit tests accept points up to `tolerance`
    /// outside an outline.
    pub fn with_hit_tolerance(tolerance: f64) -> Self {
        Self {
            hit_test: HitTestContext::new(tolerance),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds an element laid out at `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::DuplicateElement`] if `id` is already present.
    pub fn add_node(
        &mut self,
        id: Id,
        style: impl Into<NodeStyle>,
        layout: Bounds,
    ) -> Result<(), StyleError> {
        if self.nodes.contains_key(&id) {
            return Err(StyleError::DuplicateElement(id));
        }
        let style = style.into();
        debug!(id:% = id, kind = style.kind().name(); "Adding scene node");
        self.nodes.insert(
            id,
            SceneNode {
                style,
                layout: layout.normalized(),
                labels: Vec::new(),
            },
        );
        Ok(())
    }

    /// Removes an element together with its labels and retained visual.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownElement`] if `id` is not present.
    pub fn remove_node(&mut self, id: Id) -> Result<SceneNode, StyleError> {
        self.rendered.shift_remove(&id);
        self.nodes
            .shift_remove(&id)
            .ok_or(StyleError::UnknownElement(id))
    }

    pub fn node(&self, id: Id) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Mutable access to the style of an element.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownElement`] if `id` is not present.
    pub fn style_mut(&mut self, id: Id) -> Result<&mut NodeStyle, StyleError> {
        self.node_mut(id).map(|node| &mut node.style)
    }

    /// Moves or resizes an element.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownElement`] if `id` is not present.
    pub fn set_layout(&mut self, id: Id, layout: Bounds) -> Result<(), StyleError> {
        self.node_mut(id)?.layout = layout.normalized();
        Ok(())
    }

    /// Attaches a label placed inside a band of the element.
    ///
    /// Parameters the owner does not support are kept; their geometry is
    /// empty and nothing is drawn for them.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownElement`] if `id` is not present.
    pub fn add_band_label(
        &mut self,
        id: Id,
        parameter: LabelParameter,
        text: impl Into<String>,
    ) -> Result<(), StyleError> {
        let node = self.node_mut(id)?;
        if !parameter.supports(&node.style) {
            debug!(id:% = id, parameter:?; "Label parameter does not fit its owner");
        }
        node.labels.push(SceneLabel::Band {
            parameter,
            text: text.into(),
        });
        Ok(())
    }

    /// Attaches a label floating at `bounds` beside the element.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownElement`] if `id` is not present.
    pub fn add_connector_label(
        &mut self,
        id: Id,
        kind: ConnectorLabelKind,
        text: impl Into<String>,
        bounds: Bounds,
    ) -> Result<(), StyleError> {
        self.node_mut(id)?.labels.push(SceneLabel::Connector {
            style: ConnectorLabelStyle::new(kind),
            text: text.into(),
            bounds: bounds.normalized(),
        });
        Ok(())
    }

    fn node_mut(&mut self, id: Id) -> Result<&mut SceneNode, StyleError> {
        self.nodes
            .get_mut(&id)
            .ok_or(StyleError::UnknownElement(id))
    }

    /// The topmost element hit at `point`.
    ///
    /// Higher render layers win; within a layer the element added last is on
    /// top.
    pub fn hit_test(&self, point: Point) -> Option<Id> {
        let hit = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, (_, node))| node.style.is_hit(&self.hit_test, point, node.layout))
            .max_by_key(|(index, (_, node))| (node.style.layer(), *index))
            .map(|(_, (id, _))| *id);
        trace!(point:?, hit:? = hit.map(|id| id.name()); "Scene hit test");
        hit
    }

    /// Area painted by all elements and labels, or `None` for an empty
    /// scene.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .values()
            .map(SceneNode::bounds)
            .reduce(Bounds::merge)
    }

    /// Renders the scene to an SVG document.
    ///
    /// Node visuals are retained between calls: a node whose style and
    /// layout did not change is emitted from its previous visual, a moved
    /// node has its leaves re-arranged, and only nodes whose icon tree
    /// changed are rebuilt.
    pub fn render_svg(&mut self, context: &mut SvgContext) -> (svg::Document, RenderStats) {
        let mut stats = RenderStats::default();
        let mut output = LayeredOutput::new();
        let mut rendered = IndexMap::with_capacity(self.nodes.len());

        for (id, node) in &self.nodes {
            let visual = match self.rendered.swap_remove(id) {
                Some(previous) => {
                    let (visual, update) =
                        update_node_visual(context, &node.style, node.layout, previous);
                    stats.record(update);
                    visual
                }
                None => {
                    stats.record(RenderUpdate::Rebuilt);
                    create_node_visual(context, &node.style, node.layout)
                }
            };

            let group = svg_element::Group::new()
                .set("data-id", id.name())
                .set("data-kind", node.style.kind().name())
                .add(visual.visual().to_svg_node());
            output.add_to_layer(node.style.layer(), Box::new(group));
            output.merge(render_labels(context, node));

            rendered.insert(*id, visual);
        }
        self.rendered = rendered;

        let content = self
            .bounds()
            .unwrap_or_default()
            .add_padding(Insets::uniform(DOCUMENT_MARGIN));
        let doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", content.width(), content.height()),
            )
            .set("width", content.width())
            .set("height", content.height());

        let main_group = output.render().into_iter().fold(
            svg_element::Group::new().set(
                "transform",
                format!("translate({}, {})", -content.min_x(), -content.min_y()),
            ),
            |group, layer| group.add(layer),
        );

        info!(
            nodes = self.nodes.len(),
            reused = stats.reused,
            rearranged = stats.rearranged,
            rebuilt = stats.rebuilt;
            "Rendered scene"
        );
        (doc.add(main_group), stats)
    }
}

fn render_labels(context: &mut SvgContext, node: &SceneNode) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    for label in &node.labels {
        match label {
            SceneLabel::Band { parameter, text } => {
                let geometry = parameter.geometry(estimate_text_size(text), &node.style, node.layout);
                if geometry.is_empty() {
                    continue;
                }
                output.add_to_layer(RenderLayer::Label, text_element(text, geometry));
            }
            SceneLabel::Connector {
                style,
                text,
                bounds,
            } => {
                let connector = svg_element::Path::new()
                    .set("d", path_data(&style.connector(*bounds, node.layout)))
                    .set("fill", "none");
                let stroke = style.connector_stroke();
                let connector = apply_stroke!(connector, &stroke);
                output.add_to_layer(RenderLayer::Connector, Box::new(connector));

                let decoration = style
                    .icon(*bounds, node.layout)
                    .create_visual(context, *bounds);
                output.add_to_layer(style.layer(), decoration.to_svg_node());

                let text_bounds = style.text_bounds(*bounds);
                let geometry = OrientedRect::centered_in(text_bounds, estimate_text_size(text));
                output.add_to_layer(style.layer(), text_element(text, geometry));
            }
        }
    }
    output
}

/// A text element centered on `geometry`, turned with its rotation.
fn text_element(text: &str, geometry: OrientedRect) -> SvgNode {
    let center = geometry.center();
    let lines: Vec<&str> = text.lines().collect();
    let top = center.y() - (lines.len() as f64 * LINE_HEIGHT) / 2.0 - LINE_HEIGHT / 2.0;

    let mut element = svg_element::Text::new("")
        .set("x", center.x())
        .set("y", top)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE);
    if geometry.rotation() != Rotation::None {
        element = element.set(
            "transform",
            format!(
                "rotate({} {} {})",
                geometry.rotation().degrees(),
                center.x(),
                center.y()
            ),
        );
    }

    for line in lines {
        let tspan = svg_element::TSpan::new("")
            .set("x", center.x())
            .set("dy", LINE_HEIGHT)
            .add(SvgText::new(line));
        element = element.add(tspan);
    }
    Box::new(element)
}
