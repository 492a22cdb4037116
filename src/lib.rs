//! # Cycles Export
//!
//! A Rust library for writing 3D scenes in the Cycles XML scene format.
//!
//! ## Overview
//!
//! The input is a scene as held by an authoring application (camera, world,
//! objects with tessellated meshes, lights and node-based materials). The
//! output is a `<cycles>` document for the standalone renderer.
//!
//! The central piece is the shader translator: it turns a material's node
//! graph into a `<shader>` element, renaming node types and sockets to the
//! Cycles vocabulary, disambiguating same-named sockets, and materializing
//! every unconnected default value as an explicit constant node.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cycles_export::{export_scene, ExportOptions, Scene};
//!
//! let scene = Scene::from_json(&std::fs::read_to_string("scene.json")?)?;
//! let xml = export_scene(&scene, &ExportOptions::default())?;
//! ```
//!
//! ## Translating a Single Material
//!
//! ```ignore
//! use cycles_export::{translate_material, ExportOptions, SHADER_TAG};
//!
//! if let Some(shader) = translate_material(&material, SHADER_TAG, &ExportOptions::default()) {
//!     println!("{}", shader.to_xml());
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod markup;
pub mod scene;
pub mod shader;

// Re-export main types for convenience
pub use config::ExportOptions;
pub use error::{ExportError, Result};
pub use export::{export_scene, material_markup, write_scene};
pub use markup::Element;
pub use scene::{Film, ObjectData, ObjectKind, Scene, SceneObject};
pub use shader::{
    translate_material, Link, Material, NodeGraph, ShaderNode, Socket, SocketKind,
    BACKGROUND_TAG, SHADER_TAG,
};

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    let json = std::fs::read_to_string(path)?;
    Scene::from_json(&json)
}
