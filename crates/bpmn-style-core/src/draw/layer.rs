//! Layer-based z-ordering for SVG output.
//!
//! Element visuals of a scene are emitted in a fixed stacking order: container
//! elements (pools, groups) beneath nodes, connectors above nodes and label
//! text on top. [`LayeredOutput`] collects SVG nodes tagged with a
//! [`RenderLayer`] and emits them as one `<g>` per layer.
//!
//! ```
//! # use bpmn_style_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Path, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("Approve")));
//! output.add_to_layer(RenderLayer::Node, Box::new(Path::new()));
//!
//! // Node layer renders before the label layer
//! assert_eq!(output.render().len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Pools, lanes and groups that contain other elements
    Container,
    /// Flow nodes: activities, events, gateways, choreographies, data
    Node,
    /// Connectors of connector-anchored labels and message flows
    Connector,
    /// Label decorations and text
    Label,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Node => "node",
            Self::Connector => "connector",
            Self::Label => "label",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the given layer. Insertion order is kept within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes collected so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders every non-empty layer as a `<g data-layer="...">`, bottom to top.
    pub fn render(mut self) -> Vec<SvgNode> {
        // stable: keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                Some((_, group)) => {
                    result.push(Box::new(group));
                    Some((layer, new_layer_group(layer).add(node)))
                }
                None => Some((layer, new_layer_group(layer).add(node))),
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}

fn new_layer_group(layer: RenderLayer) -> svg_element::Group {
    svg_element::Group::new().set("data-layer", layer.name())
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Label, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Container, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let nodes = output.render();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].to_string().contains("data-layer=\"container\""));
        assert!(nodes[2].to_string().contains("data-layer=\"label\""));
    }

    #[test]
    fn test_merge_same_layer_groups_together() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        first.merge(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.render().len(), 1);
    }
}
