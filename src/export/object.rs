//! Object output: transforms, state wrappers, meshes and lights.

use super::writer::DocumentWriter;
use crate::error::{ExportError, Result};
use crate::markup::{escape, write_chunked_attribute, Element};
use crate::scene::{LightData, MeshData, ObjectData, SceneObject};
use crate::shader::{translate_material, SHADER_TAG};
use glam::Mat4;
use std::collections::HashSet;

/// Vertices per line of `P`.
const VERTICES_PER_LINE: usize = 3;
/// Faces per line of `nverts`.
const FACE_COUNTS_PER_LINE: usize = 50;
/// Faces per line of `verts`.
const FACE_INDICES_PER_LINE: usize = 5;
/// Faces per line of `uv`.
const FACE_UVS_PER_LINE: usize = 1;

fn join_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `<transform matrix="...">`, one matrix column per line.
///
/// Cycles reads the matrix transposed relative to the host's row-major form,
/// so the host's columns are written as rows.
pub fn write_transform_open(writer: &mut DocumentWriter<'_>, matrix: Mat4) {
    let align = writer.options().format_xml;
    let columns = matrix.to_cols_array_2d();
    let lines = write_chunked_attribute("<transform matrix", &columns, 1, align, |chunk| {
        chunk
            .iter()
            .map(|c| join_floats(c))
            .collect::<Vec<_>>()
            .join(" ")
    });
    writer.lines(lines);
    writer.line(">");
}

/// Write a `<mesh>` element with positions, face sizes, face indices and,
/// when a render UV layer exists, per-corner UVs.
pub fn write_mesh(writer: &mut DocumentWriter<'_>, mesh: &MeshData) {
    let align = writer.options().format_xml;
    // Continuation attributes line up under `P`, past "<mesh ".
    let pad = " ".repeat(if align { 6 } else { 1 });

    writer.lines(write_chunked_attribute(
        "<mesh P",
        &mesh.vertices,
        VERTICES_PER_LINE,
        align,
        |chunk| {
            chunk
                .iter()
                .map(|v| join_floats(v))
                .collect::<Vec<_>>()
                .join(" ")
        },
    ));

    writer.lines(write_chunked_attribute(
        &format!("{}nverts", pad),
        &mesh.faces,
        FACE_COUNTS_PER_LINE,
        align,
        |chunk| {
            chunk
                .iter()
                .map(|f| f.len().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        },
    ));

    writer.lines(write_chunked_attribute(
        &format!("{}verts", pad),
        &mesh.faces,
        FACE_INDICES_PER_LINE,
        align,
        |chunk| {
            chunk
                .iter()
                .flat_map(|f| f.iter().map(|i| i.to_string()))
                .collect::<Vec<_>>()
                .join(" ")
        },
    ));

    if let Some(layer) = mesh.render_uv_layer() {
        writer.lines(write_chunked_attribute(
            &format!("{}uv", pad),
            &layer.data,
            FACE_UVS_PER_LINE,
            align,
            |chunk| {
                chunk
                    .iter()
                    .flat_map(|face| face.iter().map(|uv| join_floats(uv)))
                    .collect::<Vec<_>>()
                    .join(" ")
            },
        ));
    }

    writer.line("/>");
}

/// `<light>` at the object's location.
pub fn light_element(object: &SceneObject, light: &LightData) -> Result<Element> {
    let light_type = match light.light_type.as_str() {
        "POINT" => "point",
        "SUN" => "distant",
        "SPOT" => "spot",
        "AREA" => "area",
        other => return Err(ExportError::UnknownLightType(other.to_string())),
    };
    let location = object.location();
    Ok(Element::new("light")
        .with_attr("type", light_type)
        .with_attr("P", join_floats(&location.to_array())))
}

/// Write one object: its not-yet-written materials, then its transform
/// wrapping a `<state>` (when it has a material) and the geometry or light.
///
/// `parent` is the world matrix of a group instancer. Names of written
/// materials are added to `written`.
pub fn write_object(
    writer: &mut DocumentWriter<'_>,
    object: &SceneObject,
    parent: Option<Mat4>,
    written: &mut HashSet<String>,
) -> Result<()> {
    let payload = object_payload(object)?;

    let mut first_material = None;
    for material in object.assigned_materials() {
        first_material.get_or_insert(material.name.as_str());
        if written.contains(&material.name) {
            continue;
        }
        if let Some(shader) = translate_material(material, SHADER_TAG, writer.options()) {
            written.insert(material.name.clone());
            writer.element(&shader);
        }
    }

    let matrix = match parent {
        Some(parent) => parent * object.world_matrix(),
        None => object.world_matrix(),
    };
    write_transform_open(writer, matrix);
    writer.push_indent();

    if let Some(name) = first_material {
        writer.line(&format!("<state shader=\"{}\">", escape(name)));
        writer.push_indent();
    }

    match payload {
        Payload::Mesh(mesh) => write_mesh(writer, mesh),
        Payload::Light(light) => writer.element(&light),
    }

    if first_material.is_some() {
        writer.pop_indent();
        writer.line("</state>");
    }

    writer.pop_indent();
    writer.line("</transform>");
    Ok(())
}

enum Payload<'a> {
    Mesh(&'a MeshData),
    Light(Element),
}

fn object_payload(object: &SceneObject) -> Result<Payload<'_>> {
    match &object.data {
        Some(ObjectData::Mesh(mesh)) if object.kind.is_geometry() => Ok(Payload::Mesh(mesh)),
        Some(ObjectData::Light(light)) if !object.kind.is_geometry() => {
            Ok(Payload::Light(light_element(object, light)?))
        }
        _ => Err(ExportError::UnsupportedObjectType(format!(
            "{} ({:?}) has no matching geometry or light data",
            object.name, object.kind
        ))),
    }
}
