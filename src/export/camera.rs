//! Film and camera output.

use super::object::write_transform_open;
use super::writer::DocumentWriter;
use crate::error::{ExportError, Result};
use crate::markup::Element;
use crate::scene::{CameraData, Film, ObjectData, SceneObject};
use glam::{Mat4, Vec3};

/// `<film>` with the effective output resolution.
pub fn film_element(film: &Film) -> Element {
    let (width, height) = film.size();
    Element::new("film")
        .with_attr("width", width.to_string())
        .with_attr("height", height.to_string())
}

/// `<camera>` for the given camera parameters.
pub fn camera_element(camera: &CameraData) -> Result<Element> {
    let camera_type = match camera.camera_type.as_str() {
        "ORTHO" => "orthogonal",
        "PERSP" => "perspective",
        other => return Err(ExportError::UnknownCameraType(other.to_string())),
    };

    Ok(Element::new("camera")
        .with_attr("type", camera_type)
        .with_attr("nearclip", camera.clip_start.to_string())
        .with_attr("farclip", camera.clip_end.to_string())
        .with_attr("focaldistance", camera.dof_distance.to_string())
        .with_attr("sensorwidth", camera.sensor_width.to_string())
        .with_attr("sensorheight", camera.sensor_height.to_string()))
}

/// Camera world matrix flipped along Z: Cycles cameras look down +Z, host
/// cameras down -Z.
pub fn camera_matrix(object: &SceneObject) -> Mat4 {
    object.world_matrix() * Mat4::from_scale(Vec3::new(1.0, 1.0, -1.0))
}

/// Write the camera wrapped in its transform.
pub fn write_camera(writer: &mut DocumentWriter<'_>, object: &SceneObject) -> Result<()> {
    let camera = match &object.data {
        Some(ObjectData::Camera(camera)) => camera,
        _ => {
            return Err(ExportError::UnsupportedObjectType(format!(
                "{} has no camera data",
                object.name
            )))
        }
    };
    let element = camera_element(camera)?;

    write_transform_open(writer, camera_matrix(object));
    writer.push_indent();
    writer.element(&element);
    writer.pop_indent();
    writer.line("</transform>");
    Ok(())
}
