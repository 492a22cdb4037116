//! Host scene data handed to the exporter.
//!
//! Mirrors what an authoring application exposes: render settings, the active
//! camera, the world shader and a flat list of objects with their world
//! matrices, layer membership and already-tessellated geometry. Everything
//! deserializes from JSON.

use crate::shader::Material;
use glam::{Mat4, Vec3};
use serde::Deserialize;

/// Render resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Film {
    pub resolution_x: u32,
    pub resolution_y: u32,
    #[serde(default = "default_percentage")]
    pub resolution_percentage: u32,
}

fn default_percentage() -> u32 {
    100
}

impl Default for Film {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
        }
    }
}

impl Film {
    /// Output size after applying the resolution percentage, truncated.
    pub fn size(&self) -> (u32, u32) {
        let scale = self.resolution_percentage as f32 / 100.0;
        (
            (self.resolution_x as f32 * scale) as u32,
            (self.resolution_y as f32 * scale) as u32,
        )
    }
}

/// Object type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Mesh,
    Curve,
    Surface,
    Font,
    Lamp,
    Camera,
    Empty,
    #[serde(other)]
    Other,
}

impl ObjectKind {
    /// Kinds written as tessellated geometry.
    pub fn is_geometry(self) -> bool {
        matches!(self, Self::Mesh | Self::Curve | Self::Surface | Self::Font)
    }

    /// Kinds the scene exporter writes at all.
    pub fn is_exportable(self) -> bool {
        self.is_geometry() || self == Self::Lamp
    }
}

/// Instancing mode of an object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Duplication {
    #[default]
    None,
    /// Instance every object of a group, relative to this object.
    Group { objects: Vec<SceneObject> },
    Verts,
    Faces,
    Frames,
}

/// Camera parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraData {
    /// `PERSP` or `ORTHO`.
    #[serde(rename = "type")]
    pub camera_type: String,
    #[serde(default = "default_clip_start")]
    pub clip_start: f32,
    #[serde(default = "default_clip_end")]
    pub clip_end: f32,
    #[serde(default)]
    pub dof_distance: f32,
    #[serde(default = "default_sensor_width")]
    pub sensor_width: f32,
    #[serde(default = "default_sensor_height")]
    pub sensor_height: f32,
}

fn default_clip_start() -> f32 {
    0.1
}

fn default_clip_end() -> f32 {
    100.0
}

fn default_sensor_width() -> f32 {
    32.0
}

fn default_sensor_height() -> f32 {
    18.0
}

impl CameraData {
    pub fn perspective() -> Self {
        Self {
            camera_type: "PERSP".to_string(),
            clip_start: default_clip_start(),
            clip_end: default_clip_end(),
            dof_distance: 0.0,
            sensor_width: default_sensor_width(),
            sensor_height: default_sensor_height(),
        }
    }
}

/// Light parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightData {
    /// `POINT`, `SUN`, `SPOT` or `AREA`.
    #[serde(rename = "type")]
    pub light_type: String,
}

/// A UV layer with one coordinate per face corner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UvLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active_render: bool,
    /// Per face, per corner.
    pub data: Vec<Vec<[f32; 2]>>,
}

/// Tessellated geometry.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<[f32; 3]>,
    /// Vertex indices per face.
    pub faces: Vec<Vec<u32>>,
    #[serde(default)]
    pub uv_layers: Vec<UvLayer>,
}

impl MeshData {
    /// The first UV layer flagged for rendering.
    pub fn render_uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|l| l.active_render)
    }
}

/// Type-specific object payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectData {
    Mesh(MeshData),
    Camera(CameraData),
    Light(LightData),
}

/// An object in the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Row-major world matrix, as the host reports it.
    #[serde(default = "identity_rows")]
    pub matrix_world: [[f32; 4]; 4],
    #[serde(default = "default_layers")]
    pub layers: Vec<bool>,
    #[serde(default)]
    pub hide_render: bool,
    #[serde(default)]
    pub duplication: Duplication,
    #[serde(default)]
    pub data: Option<ObjectData>,
    /// Material slots; empty slots are `null`.
    #[serde(default)]
    pub materials: Vec<Option<Material>>,
}

fn identity_rows() -> [[f32; 4]; 4] {
    Mat4::IDENTITY.transpose().to_cols_array_2d()
}

fn default_layers() -> Vec<bool> {
    vec![true]
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            matrix_world: identity_rows(),
            layers: default_layers(),
            hide_render: false,
            duplication: Duplication::None,
            data: None,
            materials: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: ObjectData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(Some(material));
        self
    }

    pub fn with_matrix(mut self, matrix: Mat4) -> Self {
        self.matrix_world = matrix.transpose().to_cols_array_2d();
        self
    }

    /// World matrix as a glam matrix.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.matrix_world).transpose()
    }

    /// Object location (world matrix translation).
    pub fn location(&self) -> Vec3 {
        self.world_matrix().w_axis.truncate()
    }

    /// Materials in assigned slots, skipping empty ones.
    pub fn assigned_materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter().flatten()
    }
}

/// A complete scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub film: Film,
    #[serde(default)]
    pub camera: Option<SceneObject>,
    #[serde(default)]
    pub world: Option<Material>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Enabled scene layers.
    #[serde(default = "default_layers")]
    pub layers: Vec<bool>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            film: Film::default(),
            camera: None,
            world: None,
            objects: Vec::new(),
            layers: default_layers(),
        }
    }
}

impl Scene {
    /// Parse a scene from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether an object shares at least one enabled layer with the scene.
    pub fn on_visible_layer(&self, object: &SceneObject) -> bool {
        self.layers
            .iter()
            .zip(&object.layers)
            .any(|(scene, obj)| *scene && *obj)
    }
}
