//! Cycles XML document assembly.
//!
//! Walks a [`Scene`] and writes the `<cycles>` document: film, camera, world
//! background, then each visible object with its materials, transform,
//! shader state and geometry.

pub mod camera;
pub mod object;
pub mod writer;

pub use writer::DocumentWriter;

use crate::config::ExportOptions;
use crate::error::{ExportError, Result};
use crate::scene::{Duplication, Scene, SceneObject};
use crate::shader::{translate_material, Material, BACKGROUND_TAG};
use glam::Mat4;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export a scene as a Cycles XML document.
///
/// Objects that fail (unknown camera or light type, missing data) are skipped
/// with a warning, or abort the export when `options.strict` is set.
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> Result<String> {
    let mut writer = DocumentWriter::new(options);
    writer.line("<cycles>");
    writer.push_indent();

    writer.element(&camera::film_element(&scene.film));

    match &scene.camera {
        Some(camera) => {
            let mut sub = writer.child();
            match camera::write_camera(&mut sub, camera) {
                Ok(()) => writer.append(sub),
                Err(e) => skip_or_abort(&camera.name, e, options)?,
            }
        }
        None => log::warn!("Scene has no camera"),
    }

    if let Some(world) = &scene.world {
        match translate_material(world, BACKGROUND_TAG, options) {
            Some(background) => writer.element(&background),
            None => log::debug!("World {} has no output node", world.name),
        }
    }

    let mut written = HashSet::new();
    for object in &scene.objects {
        if object.hide_render || !scene.on_visible_layer(object) {
            continue;
        }

        match &object.duplication {
            Duplication::None => {
                if object.kind.is_exportable() {
                    export_object(&mut writer, object, None, &mut written)?;
                }
            }
            Duplication::Group { objects } => {
                let parent = object.world_matrix();
                for member in objects.iter().filter(|m| m.kind.is_exportable()) {
                    export_object(&mut writer, member, Some(parent), &mut written)?;
                }
            }
            other => {
                log::warn!(
                    "Duplication not supported: {:?}, object {} ignored",
                    other,
                    object.name
                );
            }
        }
    }

    writer.pop_indent();
    writer.line("</cycles>");
    Ok(writer.finish())
}

fn export_object(
    writer: &mut DocumentWriter<'_>,
    object: &SceneObject,
    parent: Option<Mat4>,
    written: &mut HashSet<String>,
) -> Result<()> {
    log::debug!("Exporting object {}", object.name);
    let mut sub = writer.child();
    let mut sub_written = written.clone();
    match object::write_object(&mut sub, object, parent, &mut sub_written) {
        Ok(()) => {
            writer.append(sub);
            *written = sub_written;
            Ok(())
        }
        Err(e) => skip_or_abort(&object.name, e, writer.options()),
    }
}

fn skip_or_abort(name: &str, error: ExportError, options: &ExportOptions) -> Result<()> {
    if options.strict {
        return Err(error);
    }
    log::warn!("Skipping {}: {}", name, error);
    Ok(())
}

/// Export a scene and write it to `path`.
pub fn write_scene<P: AsRef<Path>>(path: P, scene: &Scene, options: &ExportOptions) -> Result<()> {
    let document = export_scene(scene, options)?;
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(document.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Translate one material and render it as text, or `None` when it has no
/// output node.
pub fn material_markup(material: &Material, tag: &str, options: &ExportOptions) -> Option<String> {
    let element = translate_material(material, tag, options)?;
    let mut writer = DocumentWriter::new(options);
    writer.element(&element);
    Some(writer.finish())
}
