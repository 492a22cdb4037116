//! Single-pass graph emission.
//!
//! Output order: for each emitted node, the constant nodes synthesized for
//! its unconnected inputs followed by the node itself; then one `connect` per
//! author link; then one `connect` per synthesized constant, in creation
//! order.

use super::defaults::{synthesize_default, NameAllocator, PendingConnection};
use super::attributes::special_node_attributes;
use super::socket::socket_identifier;
use super::vocabulary::translate_type;
use super::{NodeGraph, ResolvedLink, SocketSide};
use crate::config::ExportOptions;
use crate::markup::Element;
use std::collections::HashSet;

/// Translate the nodes at `emit` (graph indices, in emission order) and the
/// graph's links into a flat element sequence.
///
/// Links touching a node outside `emit` are dropped, unless
/// `options.connect_output` is set and that node is an output node, in which
/// case the link targets the reserved `output` name.
pub fn emit_graph(graph: &NodeGraph, emit: &[usize], options: &ExportOptions) -> Vec<Element> {
    let links: Vec<ResolvedLink> = graph
        .links
        .iter()
        .filter_map(|link| {
            let resolved = graph.resolve_link(link);
            if resolved.is_none() {
                log::warn!(
                    "Dropping link {}[{}] -> {}[{}]: no such node or socket",
                    link.from_node,
                    link.from_socket,
                    link.to_node,
                    link.to_socket
                );
            }
            resolved
        })
        .collect();

    let connected: HashSet<(usize, usize)> =
        links.iter().map(|l| (l.to_node, l.to_socket)).collect();

    let mut names = NameAllocator::new(graph.nodes.iter().map(|n| n.translated_name()));
    let mut pending: Vec<PendingConnection> = Vec::new();
    let mut elements = Vec::new();

    for &index in emit {
        let node = &graph.nodes[index];
        let mut element = Element::new(translate_type(&node.node_type))
            .with_attr("name", node.translated_name());

        for input in 0..node.inputs.len() {
            if connected.contains(&(index, input)) {
                continue;
            }
            if let Some((constant, connection)) = synthesize_default(node, index, input, &mut names) {
                elements.push(constant);
                pending.push(connection);
            }
        }

        for (key, value) in special_node_attributes(node, options) {
            element.set(key, value);
        }
        elements.push(element);
    }

    let emitted: HashSet<usize> = emit.iter().copied().collect();
    let keep = |node: usize| {
        emitted.contains(&node) || (options.connect_output && graph.nodes[node].is_output())
    };

    let mut linked: HashSet<(usize, usize)> = HashSet::new();
    for link in &links {
        if !keep(link.from_node) || !keep(link.to_node) {
            log::debug!(
                "Dropping link {} -> {}: endpoint not emitted",
                graph.nodes[link.from_node].name,
                graph.nodes[link.to_node].name
            );
            continue;
        }
        if !linked.insert((link.to_node, link.to_socket)) {
            log::warn!(
                "Dropping link {}[{}] -> {}[{}]: input already connected",
                graph.nodes[link.from_node].name,
                link.from_socket,
                graph.nodes[link.to_node].name,
                link.to_socket
            );
            continue;
        }
        if let Some(connect) = link_element(graph, link) {
            elements.push(connect);
        }
    }

    for connection in &pending {
        let node = &graph.nodes[connection.to_node];
        if let Some(socket) = socket_identifier(node, SocketSide::Input, connection.to_socket) {
            elements.push(connect_element(
                &connection.from_node,
                connection.from_socket,
                &node.translated_name(),
                &socket,
            ));
        }
    }

    elements
}

fn link_element(graph: &NodeGraph, link: &ResolvedLink) -> Option<Element> {
    let from = &graph.nodes[link.from_node];
    let to = &graph.nodes[link.to_node];
    let from_socket = socket_identifier(from, SocketSide::Output, link.from_socket)?;
    let to_socket = socket_identifier(to, SocketSide::Input, link.to_socket)?;
    Some(connect_element(
        &from.translated_name(),
        &from_socket,
        &to.translated_name(),
        &to_socket,
    ))
}

fn connect_element(from_node: &str, from_socket: &str, to_node: &str, to_socket: &str) -> Element {
    Element::new("connect")
        .with_attr(
            "from",
            format!("{} {}", from_node, from_socket.replace(' ', "_")),
        )
        .with_attr("to", format!("{} {}", to_node, to_socket.replace(' ', "_")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{Link, ShaderNode, Socket};

    fn mix_graph() -> NodeGraph {
        NodeGraph::new()
            .with_node(ShaderNode::new("Color A", "RGB").with_output(Socket::color("Color", [1.0, 0.0, 0.0, 1.0])))
            .with_node(
                ShaderNode::new("Mix", "MIX_RGB")
                    .with_input(Socket::value("Fac", 0.5))
                    .with_input(Socket::color("Color", [0.0; 4]))
                    .with_input(Socket::color("Color", [0.0, 0.0, 1.0, 1.0]))
                    .with_output(Socket::color("Color", [0.0; 4])),
            )
            .with_node(
                ShaderNode::new("Diffuse BSDF", "BSDF_DIFFUSE")
                    .with_input(Socket::color("Color", [0.8, 0.8, 0.8, 1.0]))
                    .with_output(Socket::shader("BSDF")),
            )
            .with_link(Link::new("Color A", 0, "Mix", 1))
            .with_link(Link::new("Mix", 0, "Diffuse BSDF", 0))
    }

    #[test]
    fn test_order_and_tags() {
        let graph = mix_graph();
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let tags: Vec<&str> = elements.iter().map(|e| e.tag.as_str()).collect();
        // Mix's Fac and second Color are unconnected; Diffuse's Color is linked.
        assert_eq!(
            tags,
            vec!["color", "value", "color", "mix", "diffuse_bsdf", "connect", "connect", "connect", "connect"]
        );
        assert_eq!(elements[0].get("name"), Some("Color_A"));
        assert_eq!(elements[0].get("value"), Some("1 0 0"));
        assert_eq!(elements[3].get("name"), Some("Mix"));
    }

    #[test]
    fn test_author_links_then_pending() {
        let graph = mix_graph();
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let connects: Vec<&Element> = elements.iter().filter(|e| e.tag == "connect").collect();

        assert_eq!(connects[0].get("from"), Some("Color_A Color"));
        assert_eq!(connects[0].get("to"), Some("Mix Color1"));
        assert_eq!(connects[1].get("from"), Some("Mix Color"));
        assert_eq!(connects[1].get("to"), Some("Diffuse_BSDF Color"));

        let fac_name = elements[1].get("name").unwrap();
        assert_eq!(connects[2].get("from").unwrap(), format!("{} Value", fac_name));
        assert_eq!(connects[2].get("to"), Some("Mix Fac"));
        let color_name = elements[2].get("name").unwrap();
        assert_eq!(connects[3].get("from").unwrap(), format!("{} Color", color_name));
        assert_eq!(connects[3].get("to"), Some("Mix Color2"));
    }

    #[test]
    fn test_every_connected_input_has_one_edge() {
        let graph = mix_graph();
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let targets: Vec<&str> = elements
            .iter()
            .filter(|e| e.tag == "connect")
            .filter_map(|e| e.get("to"))
            .collect();
        for expected in ["Mix Fac", "Mix Color1", "Mix Color2", "Diffuse_BSDF Color"] {
            assert_eq!(targets.iter().filter(|t| **t == expected).count(), 1, "{}", expected);
        }
    }

    #[test]
    fn test_edges_reference_earlier_nodes() {
        let graph = mix_graph();
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let mut seen = HashSet::new();
        for el in &elements {
            if el.tag == "connect" {
                for key in ["from", "to"] {
                    let node = el.get(key).unwrap().split(' ').next().unwrap();
                    assert!(seen.contains(node), "{} not emitted before edge", node);
                }
            } else {
                seen.insert(el.get("name").unwrap().to_string());
            }
        }
    }

    #[test]
    fn test_invalid_link_dropped() {
        let graph = mix_graph().with_link(Link::new("Missing", 0, "Mix", 0));
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        assert!(elements
            .iter()
            .filter_map(|e| e.get("from"))
            .all(|from| !from.starts_with("Missing")));
        // The bad link does not count as connecting Mix.Fac.
        assert!(elements.iter().any(|e| e.get("to") == Some("Mix Fac")));
    }

    #[test]
    fn test_duplicate_link_single_edge() {
        let graph = mix_graph()
            .with_link(Link::new("Mix", 0, "Diffuse BSDF", 0))
            .with_link(Link::new("Color A", 0, "Diffuse BSDF", 0));
        let elements = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let edges: Vec<&Element> = elements
            .iter()
            .filter(|e| e.tag == "connect" && e.get("to") == Some("Diffuse_BSDF Color"))
            .collect();
        assert_eq!(edges.len(), 1);
        // The first link authored for the input wins.
        assert_eq!(edges[0].get("from"), Some("Mix Color"));
    }

    #[test]
    fn test_graph_not_mutated() {
        let graph = mix_graph();
        let before = graph.clone();
        emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        assert_eq!(graph, before);
    }

    #[test]
    fn test_deterministic() {
        let graph = mix_graph();
        let a = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        let b = emit_graph(&graph, &[0, 1, 2], &ExportOptions::default());
        assert_eq!(a, b);
    }
}
