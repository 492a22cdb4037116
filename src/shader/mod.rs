//! Shader node graph translation.
//!
//! Converts a material's node graph, as authored in the host application,
//! into a Cycles `<shader>` (or `<background>`) element: one element per
//! node, constant producer nodes for every unconnected input that carries a
//! default value, and one `<connect>` element per edge.
//!
//! The host graph types in this module are plain data. Nodes are addressed by
//! their index in [`NodeGraph::nodes`], sockets by their index within a node's
//! input or output list, since socket display names are not unique.

pub mod attributes;
pub mod defaults;
pub mod emitter;
pub mod material;
pub mod socket;
pub mod vocabulary;

pub use emitter::emit_graph;
pub use material::{translate_material, BACKGROUND_TAG, SHADER_TAG};
pub use socket::{socket_identifier, socket_identifiers, socket_suffix};
pub use vocabulary::{translate_socket, translate_type};

use serde::Deserialize;

/// Data kind carried by a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocketKind {
    /// Color with alpha.
    Rgba,
    /// Single scalar.
    Value,
    Vector,
    /// BSDF / closure.
    Shader,
    Int,
    Boolean,
    String,
    #[serde(other)]
    Other,
}

/// Constant value of an unconnected socket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Scalar(f32),
    Array(Vec<f32>),
}

/// A named input or output port on a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Socket {
    /// Display name, not unique among sibling sockets.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SocketKind,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
}

impl Socket {
    pub fn new(name: impl Into<String>, kind: SocketKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// An RGBA socket with a default color.
    pub fn color(name: impl Into<String>, rgba: [f32; 4]) -> Self {
        Self::new(name, SocketKind::Rgba).with_default(DefaultValue::Array(rgba.to_vec()))
    }

    /// A scalar socket with a default value.
    pub fn value(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, SocketKind::Value).with_default(DefaultValue::Scalar(value))
    }

    pub fn shader(name: impl Into<String>) -> Self {
        Self::new(name, SocketKind::Shader)
    }
}

/// Which list of a node a socket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketSide {
    Input,
    Output,
}

/// Image referenced by a texture node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    /// Path as stored by the host; `//` marks a path relative to the host file.
    pub filepath: String,
}

/// A typed shading node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShaderNode {
    /// Unique within its graph.
    pub name: String,
    /// Host node type, e.g. `BSDF_DIFFUSE`.
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub inputs: Vec<Socket>,
    #[serde(default)]
    pub outputs: Vec<Socket>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl ShaderNode {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            image: None,
        }
    }

    pub fn with_input(mut self, socket: Socket) -> Self {
        self.inputs.push(socket);
        self
    }

    pub fn with_output(mut self, socket: Socket) -> Self {
        self.outputs.push(socket);
        self
    }

    pub fn with_image(mut self, filepath: impl Into<String>) -> Self {
        self.image = Some(ImageRef {
            filepath: filepath.into(),
        });
        self
    }

    pub fn sockets(&self, side: SocketSide) -> &[Socket] {
        match side {
            SocketSide::Input => &self.inputs,
            SocketSide::Output => &self.outputs,
        }
    }

    pub fn socket(&self, side: SocketSide, index: usize) -> Option<&Socket> {
        self.sockets(side).get(index)
    }

    /// First output with the given display name.
    pub fn output_named(&self, name: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.name == name)
    }

    /// Whether this node is a designated output/sink of its graph.
    pub fn is_output(&self) -> bool {
        matches!(
            self.node_type.as_str(),
            "OUTPUT" | "OUTPUT_MATERIAL" | "OUTPUT_WORLD"
        )
    }

    /// Name used for this node in the translated graph.
    pub fn translated_name(&self) -> String {
        if self.is_output() {
            return "output".to_string();
        }
        self.name.replace(' ', "_")
    }
}

/// A directed edge from an output socket to an input socket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub from_node: String,
    /// Index into the source node's outputs.
    pub from_socket: usize,
    pub to_node: String,
    /// Index into the destination node's inputs.
    pub to_socket: usize,
}

impl Link {
    pub fn new(
        from_node: impl Into<String>,
        from_socket: usize,
        to_node: impl Into<String>,
        to_socket: usize,
    ) -> Self {
        Self {
            from_node: from_node.into(),
            from_socket,
            to_node: to_node.into(),
            to_socket,
        }
    }
}

/// A link whose endpoints have been checked against the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLink {
    pub from_node: usize,
    pub from_socket: usize,
    pub to_node: usize,
    pub to_socket: usize,
}

/// Nodes and links of one material.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeGraph {
    #[serde(default)]
    pub nodes: Vec<ShaderNode>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: ShaderNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Resolve a link to node indices, or `None` if an endpoint is missing.
    pub fn resolve_link(&self, link: &Link) -> Option<ResolvedLink> {
        let from_node = self.node_index(&link.from_node)?;
        let to_node = self.node_index(&link.to_node)?;
        self.nodes[from_node].outputs.get(link.from_socket)?;
        self.nodes[to_node].inputs.get(link.to_socket)?;
        Some(ResolvedLink {
            from_node,
            from_socket: link.from_socket,
            to_node,
            to_socket: link.to_socket,
        })
    }
}

/// A material (or world) as seen by the translator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Material {
    pub name: String,
    /// Whether the material is shaded by its node graph.
    #[serde(default = "default_use_nodes")]
    pub use_nodes: bool,
    #[serde(default)]
    pub node_tree: Option<NodeGraph>,
    /// Flat color used when the material is not node based.
    #[serde(
        default = "default_flat_color",
        alias = "diffuse_color",
        alias = "horizon_color"
    )]
    pub color: [f32; 3],
}

fn default_use_nodes() -> bool {
    true
}

fn default_flat_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}

impl Material {
    pub fn with_nodes(name: impl Into<String>, graph: NodeGraph) -> Self {
        Self {
            name: name.into(),
            use_nodes: true,
            node_tree: Some(graph),
            color: default_flat_color(),
        }
    }

    /// A material without a node graph, shaded by a flat color.
    pub fn flat(name: impl Into<String>, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            use_nodes: false,
            node_tree: None,
            color,
        }
    }
}
