//! Constant producer nodes for unconnected inputs.
//!
//! Cycles XML only expresses values through connections, so a default value
//! baked into an unconnected input is materialized as a `color` or `value`
//! node wired into that input.

use super::{DefaultValue, ShaderNode, SocketKind};
use crate::markup::Element;
use std::collections::HashSet;

const SUFFIX_LEN: usize = 5;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A connection from a synthesized node, resolved after all nodes are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    /// Generated name of the synthesized node.
    pub from_node: String,
    /// Output socket of the synthesized node: `Color` or `Value`.
    pub from_socket: &'static str,
    /// Graph index of the consuming node.
    pub to_node: usize,
    /// Input index on the consuming node.
    pub to_socket: usize,
}

/// Allocates names for synthesized nodes.
///
/// Names are the destination socket name plus a suffix hashed from the
/// destination node and socket, so repeated translations of the same graph
/// produce the same text. Names already taken in the graph are skipped.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allocate(&mut self, node_name: &str, socket_index: usize, socket_name: &str) -> String {
        let base = socket_name.replace(' ', "_");
        let mut attempt = 0u64;
        loop {
            let seed = fnv1a(&[
                node_name.as_bytes(),
                &socket_index.to_le_bytes(),
                &attempt.to_le_bytes(),
            ]);
            let name = format!("{}{}", base, suffix(seed));
            if self.taken.insert(name.clone()) {
                return name;
            }
            attempt += 1;
        }
    }
}

fn fnv1a(parts: &[&[u8]]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for byte in *part {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        // Separator so ("ab", "c") and ("a", "bc") differ.
        hash ^= 0xff;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

fn suffix(mut seed: u64) -> String {
    let base = SUFFIX_ALPHABET.len() as u64;
    (0..SUFFIX_LEN)
        .map(|_| {
            let c = SUFFIX_ALPHABET[(seed % base) as usize] as char;
            seed /= base;
            c
        })
        .collect()
}

/// Build the constant node for input `input_index` of node `node_index`, if
/// that input has a default value of a kind Cycles can express.
///
/// The caller has already checked that the input is unconnected.
pub fn synthesize_default(
    node: &ShaderNode,
    node_index: usize,
    input_index: usize,
    names: &mut NameAllocator,
) -> Option<(Element, PendingConnection)> {
    let socket = node.inputs.get(input_index)?;
    let value = socket.default_value.as_ref()?;

    let (tag, role, text) = match (socket.kind, value) {
        (SocketKind::Rgba, DefaultValue::Array(channels)) if channels.len() >= 3 => (
            "color",
            "Color",
            format!("{:.6} {:.6} {:.6}", channels[0], channels[1], channels[2]),
        ),
        (SocketKind::Value, DefaultValue::Scalar(v)) => ("value", "Value", format!("{:.6}", v)),
        // No Cycles node produces a constant vector.
        (SocketKind::Vector, _) => return None,
        (SocketKind::Rgba, _) | (SocketKind::Value, _) => {
            log::warn!(
                "Malformed default value {:?} for {:?} socket (node {}, socket {})",
                value,
                socket.kind,
                node.name,
                socket.name
            );
            return None;
        }
        (kind, _) => {
            log::warn!(
                "Unsupported default value for socket of type {:?} (node {}, socket {})",
                kind,
                node.name,
                socket.name
            );
            return None;
        }
    };

    let name = names.allocate(&node.name, input_index, &socket.name);
    let element = Element::new(tag)
        .with_attr("value", text)
        .with_attr("name", name.clone());
    let pending = PendingConnection {
        from_node: name,
        from_socket: role,
        to_node: node_index,
        to_socket: input_index,
    };
    Some((element, pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::Socket;

    fn diffuse() -> ShaderNode {
        ShaderNode::new("Diffuse BSDF", "BSDF_DIFFUSE")
            .with_input(Socket::color("Color", [0.8, 0.8, 0.8, 1.0]))
            .with_input(Socket::value("Roughness", 0.25))
            .with_input(Socket::new("Normal", SocketKind::Vector).with_default(DefaultValue::Array(vec![0.0; 3])))
            .with_input(Socket::shader("Shader").with_default(DefaultValue::Scalar(0.0)))
            .with_input(Socket::new("Empty", SocketKind::Value))
    }

    #[test]
    fn test_color_default() {
        let mut names = NameAllocator::default();
        let (el, pending) = synthesize_default(&diffuse(), 3, 0, &mut names).unwrap();
        assert_eq!(el.tag, "color");
        assert_eq!(el.get("value"), Some("0.800000 0.800000 0.800000"));
        let name = el.get("name").unwrap();
        assert!(name.starts_with("Color"));
        assert_eq!(name.len(), "Color".len() + SUFFIX_LEN);
        assert_eq!(pending.from_node, name);
        assert_eq!(pending.from_socket, "Color");
        assert_eq!((pending.to_node, pending.to_socket), (3, 0));
    }

    #[test]
    fn test_value_default() {
        let mut names = NameAllocator::default();
        let (el, pending) = synthesize_default(&diffuse(), 0, 1, &mut names).unwrap();
        assert_eq!(el.tag, "value");
        assert_eq!(el.get("value"), Some("0.250000"));
        assert_eq!(pending.from_socket, "Value");
    }

    #[test]
    fn test_vector_and_closure_skipped() {
        let mut names = NameAllocator::default();
        assert!(synthesize_default(&diffuse(), 0, 2, &mut names).is_none());
        assert!(synthesize_default(&diffuse(), 0, 3, &mut names).is_none());
    }

    #[test]
    fn test_no_default_skipped() {
        let mut names = NameAllocator::default();
        assert!(synthesize_default(&diffuse(), 0, 4, &mut names).is_none());
        assert!(synthesize_default(&diffuse(), 0, 99, &mut names).is_none());
    }

    #[test]
    fn test_short_color_skipped() {
        let node = ShaderNode::new("N", "BSDF_DIFFUSE")
            .with_input(Socket::new("Color", SocketKind::Rgba).with_default(DefaultValue::Array(vec![1.0])));
        let mut names = NameAllocator::default();
        assert!(synthesize_default(&node, 0, 0, &mut names).is_none());
    }

    #[test]
    fn test_names_deterministic() {
        let mut a = NameAllocator::default();
        let mut b = NameAllocator::default();
        assert_eq!(a.allocate("Mix", 1, "Color"), b.allocate("Mix", 1, "Color"));
        assert_ne!(a.allocate("Mix", 2, "Color"), a.allocate("Mix", 1, "Color"));
    }

    #[test]
    fn test_names_avoid_taken() {
        let mut probe = NameAllocator::default();
        let first = probe.allocate("Mix", 1, "Base Color");
        assert!(first.starts_with("Base_Color"));

        let mut names = NameAllocator::new([first.as_str()]);
        let second = names.allocate("Mix", 1, "Base Color");
        assert_ne!(first, second);
    }
}
