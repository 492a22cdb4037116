//! Host node type and socket name translation.

use std::collections::HashMap;
use std::sync::OnceLock;

type SocketRenames = &'static [(&'static str, &'static str)];

/// Host node type, Cycles node type, socket renames.
///
/// An empty Cycles type marks a sink node that is stripped, not translated.
const TRANSLATIONS: &[(&str, &str, SocketRenames)] = &[
    ("RGB", "color", &[]),
    ("BSDF_DIFFUSE", "diffuse_bsdf", &[]),
    ("BSDF_TRANSPARENT", "transparent_bsdf", &[]),
    ("BSDF_GLOSSY", "glossy_bsdf", &[]),
    ("BUMP", "bump", &[]),
    ("FRESNEL", "fresnel", &[]),
    ("MATH", "math", &[]),
    ("MIX_RGB", "mix", &[]),
    ("MIX_SHADER", "mix_closure", &[("Shader", "closure")]),
    ("OUTPUT_MATERIAL", "", &[]),
    ("SUBSURFACE_SCATTERING", "subsurface_scattering", &[]),
    ("TEX_IMAGE", "image_texture", &[]),
    ("TEX_MAGIC", "magic_texture", &[]),
    ("TEX_NOISE", "noise_texture", &[]),
    ("TEX_COORD", "texture_coordinate", &[]),
    ("TEX_CHECKER", "checker_texture", &[]),
    ("NEW_GEOMETRY", "geometry", &[]),
];

fn table() -> &'static HashMap<&'static str, (&'static str, SocketRenames)> {
    static TABLE: OnceLock<HashMap<&'static str, (&'static str, SocketRenames)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        TRANSLATIONS
            .iter()
            .map(|(host, cycles, renames)| (*host, (*cycles, *renames)))
            .collect()
    })
}

/// Cycles node type for a host node type.
///
/// Types missing from the table pass through lowercased.
pub fn translate_type(host_type: &str) -> String {
    match table().get(host_type) {
        Some((cycles, _)) => (*cycles).to_string(),
        None => host_type.to_lowercase(),
    }
}

/// Cycles socket name for a socket of a host node type.
///
/// Names without a rename entry are returned unchanged.
pub fn translate_socket(host_type: &str, socket_name: &str) -> String {
    table()
        .get(host_type)
        .and_then(|(_, renames)| renames.iter().find(|(from, _)| *from == socket_name))
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| socket_name.to_string())
}
