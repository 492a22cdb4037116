//! Per-node socket identifiers.
//!
//! Sockets on one node may share a display name (a mix node has two `Color`
//! inputs). Duplicates get their 1-based ordinal among same-named siblings
//! appended, so `Color`, `Color` become `Color1`, `Color2`. Inputs and outputs
//! are counted independently. Names are compared with spaces removed.
//!
//! A numbered identifier can still clash with a sibling whose own name ends
//! in a digit (`Color`, `Color`, `Color1`). The later socket then takes the
//! first free numbered form of its identifier (`Color11`).

use super::vocabulary::translate_socket;
use super::{ShaderNode, SocketSide};
use std::collections::HashSet;

fn normalized(name: &str) -> String {
    name.replace(' ', "")
}

/// Positional suffix for a socket: empty when its name is unique on its side
/// of the node, the ordinal among same-named sockets otherwise.
pub fn socket_suffix(node: &ShaderNode, side: SocketSide, index: usize) -> String {
    let sockets = node.sockets(side);
    let Some(socket) = sockets.get(index) else {
        return String::new();
    };

    let key = normalized(&socket.name);
    let count = sockets.iter().filter(|s| normalized(&s.name) == key).count();
    if count <= 1 {
        return String::new();
    }
    let ordinal = sockets[..=index]
        .iter()
        .filter(|s| normalized(&s.name) == key)
        .count();
    ordinal.to_string()
}

/// Translated identifiers of every socket on one side of a node, pairwise
/// distinct and in socket order.
pub fn socket_identifiers(node: &ShaderNode, side: SocketSide) -> Vec<String> {
    let candidates: Vec<String> = node
        .sockets(side)
        .iter()
        .enumerate()
        .map(|(index, socket)| {
            translate_socket(&node.node_type, &normalized(&socket.name))
                + &socket_suffix(node, side, index)
        })
        .collect();

    let reserved: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    let mut used: HashSet<String> = HashSet::new();
    candidates
        .iter()
        .map(|candidate| {
            let mut id = candidate.clone();
            let mut n = 1;
            while used.contains(&id) {
                id = format!("{}{}", candidate, n);
                if reserved.contains(id.as_str()) {
                    id = candidate.clone();
                }
                n += 1;
            }
            used.insert(id.clone());
            id
        })
        .collect()
}

/// Full translated identifier of a socket within its node, or `None` when
/// the index is out of range.
pub fn socket_identifier(node: &ShaderNode, side: SocketSide, index: usize) -> Option<String> {
    socket_identifiers(node, side).into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::Socket;
    use std::collections::HashSet;

    fn mix_node() -> ShaderNode {
        ShaderNode::new("Mix", "MIX_RGB")
            .with_input(Socket::value("Fac", 0.5))
            .with_input(Socket::color("Color", [1.0, 0.0, 0.0, 1.0]))
            .with_input(Socket::color("Color", [0.0, 0.0, 1.0, 1.0]))
            .with_output(Socket::color("Color", [0.0; 4]))
    }

    #[test]
    fn test_unique_name_has_no_suffix() {
        let node = mix_node();
        assert_eq!(socket_suffix(&node, SocketSide::Input, 0), "");
        assert_eq!(socket_identifier(&node, SocketSide::Input, 0).unwrap(), "Fac");
    }

    #[test]
    fn test_duplicate_inputs_numbered() {
        let node = mix_node();
        assert_eq!(socket_identifier(&node, SocketSide::Input, 1).unwrap(), "Color1");
        assert_eq!(socket_identifier(&node, SocketSide::Input, 2).unwrap(), "Color2");
    }

    #[test]
    fn test_sides_counted_independently() {
        // The single `Color` output is unique among outputs.
        let node = mix_node();
        assert_eq!(socket_identifier(&node, SocketSide::Output, 0).unwrap(), "Color");
    }

    #[test]
    fn test_duplicate_outputs_numbered() {
        let node = ShaderNode::new("Split", "SEPARATE")
            .with_output(Socket::color("Color", [0.0; 4]))
            .with_output(Socket::color("Color", [0.0; 4]));
        assert_eq!(socket_identifier(&node, SocketSide::Output, 0).unwrap(), "Color1");
        assert_eq!(socket_identifier(&node, SocketSide::Output, 1).unwrap(), "Color2");
    }

    #[test]
    fn test_spaces_removed_and_renamed() {
        let node = ShaderNode::new("Mix Shader", "MIX_SHADER")
            .with_input(Socket::value("Fac", 0.5))
            .with_input(Socket::shader("Shader"))
            .with_input(Socket::shader("Shader"))
            .with_input(Socket::color("Base Color", [1.0; 4]));
        assert_eq!(socket_identifier(&node, SocketSide::Input, 1).unwrap(), "closure1");
        assert_eq!(socket_identifier(&node, SocketSide::Input, 2).unwrap(), "closure2");
        assert_eq!(socket_identifier(&node, SocketSide::Input, 3).unwrap(), "BaseColor");
    }

    #[test]
    fn test_identifiers_pairwise_distinct() {
        let node = ShaderNode::new("Many", "GROUP")
            .with_input(Socket::value("A", 0.0))
            .with_input(Socket::value("A", 0.0))
            .with_input(Socket::value("B", 0.0))
            .with_input(Socket::value("A", 0.0))
            .with_input(Socket::value("B", 0.0));
        let ids: HashSet<String> = (0..node.inputs.len())
            .map(|i| socket_identifier(&node, SocketSide::Input, i).unwrap())
            .collect();
        assert_eq!(ids.len(), node.inputs.len());
    }

    #[test]
    fn test_numbered_name_does_not_collide() {
        let node = ShaderNode::new("Mix", "MIX_RGB")
            .with_input(Socket::color("Color", [0.0; 4]))
            .with_input(Socket::color("Color", [0.0; 4]))
            .with_input(Socket::color("Color1", [0.0; 4]));
        assert_eq!(
            socket_identifiers(&node, SocketSide::Input),
            vec!["Color1", "Color2", "Color11"]
        );
    }

    #[test]
    fn test_names_compared_without_spaces() {
        let node = ShaderNode::new("Principled", "BSDF_PRINCIPLED")
            .with_input(Socket::color("Base Color", [0.0; 4]))
            .with_input(Socket::color("BaseColor", [0.0; 4]));
        assert_eq!(
            socket_identifiers(&node, SocketSide::Input),
            vec!["BaseColor1", "BaseColor2"]
        );
    }

    #[test]
    fn test_out_of_range() {
        let node = mix_node();
        assert!(socket_identifier(&node, SocketSide::Input, 9).is_none());
        assert_eq!(socket_suffix(&node, SocketSide::Input, 9), "");
    }
}
