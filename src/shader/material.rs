//! Material and world shader translation.

use super::emitter::emit_graph;
use super::{DefaultValue, Link, Material, NodeGraph, ShaderNode, Socket, SocketKind};
use crate::config::ExportOptions;
use crate::markup::Element;
use std::borrow::Cow;

/// Container tag for object materials.
pub const SHADER_TAG: &str = "shader";
/// Container tag for world/environment shaders.
pub const BACKGROUND_TAG: &str = "background";

/// Translate a material into a `tag` element named after the material.
///
/// Returns `None` when the graph has no output node: the material has no
/// active shader and is left out of the document.
pub fn translate_material(material: &Material, tag: &str, options: &ExportOptions) -> Option<Element> {
    let graph: Cow<'_, NodeGraph> = match (&material.node_tree, material.use_nodes) {
        (Some(tree), true) => Cow::Borrowed(tree),
        (None, true) => Cow::Owned(NodeGraph::default()),
        (_, false) => Cow::Owned(flat_graph(material, tag)),
    };

    let (outputs, emit): (Vec<usize>, Vec<usize>) =
        (0..graph.nodes.len()).partition(|&i| graph.nodes[i].is_output());

    if outputs.is_empty() {
        log::debug!("Material {} has no output node, skipping", material.name);
        return None;
    }

    let mut container = Element::new(tag).with_attr("name", material.name.clone());
    container.children = emit_graph(&graph, &emit, options);
    Some(container)
}

/// Two-node stand-in graph for a material that is not node based: a diffuse
/// BSDF (or background, for world shaders) with the material's flat color,
/// feeding the output.
pub fn flat_graph(material: &Material, tag: &str) -> NodeGraph {
    let [r, g, b] = material.color;
    let color = [r, g, b, 1.0];

    let (source, output) = if tag == BACKGROUND_TAG {
        (
            ShaderNode::new("Background", "BACKGROUND")
                .with_input(Socket::color("Color", color))
                .with_input(Socket::value("Strength", 1.0))
                .with_output(Socket::shader("Background")),
            ShaderNode::new("World Output", "OUTPUT_WORLD")
                .with_input(Socket::shader("Surface"))
                .with_input(Socket::shader("Volume")),
        )
    } else {
        (
            ShaderNode::new("Diffuse BSDF", "BSDF_DIFFUSE")
                .with_input(Socket::color("Color", color))
                .with_input(Socket::value("Roughness", 0.0))
                .with_input(
                    Socket::new("Normal", SocketKind::Vector)
                        .with_default(DefaultValue::Array(vec![0.0, 0.0, 0.0])),
                )
                .with_output(Socket::shader("BSDF")),
            ShaderNode::new("Material Output", "OUTPUT_MATERIAL")
                .with_input(Socket::shader("Surface"))
                .with_input(Socket::shader("Volume"))
                .with_input(Socket::new("Displacement", SocketKind::Value)),
        )
    };

    let link = Link::new(source.name.clone(), 0, output.name.clone(), 0);
    NodeGraph::new().with_node(source).with_node(output).with_link(link)
}
