//! Node-specific attributes: texture sources and baked constants.

use super::{DefaultValue, ImageRef, ShaderNode};
use crate::config::ExportOptions;
use crate::error::{ExportError, Result};
use base64::{engine::general_purpose, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::path::PathBuf;

/// Extra attributes for a node, beyond its name.
///
/// Image textures get `src` (and `inline` when embedding), `RGB` and `VALUE`
/// nodes get the constant they produce.
pub fn special_node_attributes(node: &ShaderNode, options: &ExportOptions) -> Vec<(String, String)> {
    match node.node_type.as_str() {
        "TEX_IMAGE" => match &node.image {
            Some(image) => image_attributes(image, options),
            None => Vec::new(),
        },
        "RGB" => match node.output_named("Color").and_then(|s| s.default_value.as_ref()) {
            Some(DefaultValue::Array(c)) if c.len() >= 3 => {
                vec![("value".to_string(), format!("{} {} {}", c[0], c[1], c[2]))]
            }
            _ => Vec::new(),
        },
        "VALUE" => match node.output_named("Value").and_then(|s| s.default_value.as_ref()) {
            Some(DefaultValue::Scalar(v)) => vec![("value".to_string(), format!("{:.6}", v))],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Image path with the host's `//` relative marker removed.
pub fn image_source(image: &ImageRef) -> &str {
    image.filepath.strip_prefix("//").unwrap_or(&image.filepath)
}

fn image_attributes(image: &ImageRef, options: &ExportOptions) -> Vec<(String, String)> {
    let src = image_source(image);
    let mut attrs = vec![("src".to_string(), src.to_string())];
    if options.inline_textures {
        match encode_inline(src, options) {
            Ok(data) => attrs.push(("inline".to_string(), data)),
            Err(e) => log::warn!("Could not embed texture {}: {}", src, e),
        }
    }
    attrs
}

fn resolve_path(src: &str, options: &ExportOptions) -> PathBuf {
    let path = PathBuf::from(src);
    match &options.texture_root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path,
    }
}

/// Load the image, re-encode it as PNG and return the base64 text.
pub fn encode_inline(src: &str, options: &ExportOptions) -> Result<String> {
    let path = resolve_path(src, options);
    let img = image::open(&path)?.to_rgba8();

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::Texture(format!("Failed to encode PNG {:?}: {}", path, e)))?;

    Ok(general_purpose::STANDARD.encode(&png))
}
