//! Built-in scenes.
//!
//! A [`Scene`] bundles the geometry, the shader sources and whether the color animates.
//! [`Variant`] picks one of the two built-in scenes.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::abs::{Gpu, Vertex};
use crate::error::RenderError;

/// Name of the color uniform written by animated scenes.
pub const COLOR_UNIFORM: &str = "u_color";

/// A vertex carrying only a position, bound to attribute location 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Position(pub [f32; 3]);

impl Vertex for Position {
    fn vertex_attribs<G: Gpu>(gl: &G) {
        let stride = std::mem::size_of::<Position>() as i32;
        gl.vertex_attrib_pointer_f32(0, 3, stride, 0);
        gl.enable_vertex_attrib_array(0);
    }
}

/// CPU-side geometry: positions plus optional index triples into them.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Position>,
    indices: Option<Vec<[u32; 3]>>,
}

impl Geometry {
    /// Builds geometry, checking that every index refers to an existing position.
    pub fn new(
        positions: Vec<Position>,
        indices: Option<Vec<[u32; 3]>>,
    ) -> Result<Self, RenderError> {
        if positions.is_empty() {
            return Err(RenderError::Geometry("no vertices".to_string()));
        }
        if let Some(triangles) = &indices {
            let count = positions.len();
            if let Some(index) = triangles
                .iter()
                .flatten()
                .find(|&&i| i as usize >= count)
            {
                return Err(RenderError::Geometry(format!(
                    "index {index} out of range for {count} vertices"
                )));
            }
        }
        Ok(Self { positions, indices })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The index triples flattened into a single index list.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices
            .as_deref()
            .map(|triangles| bytemuck::cast_slice(triangles))
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |t| t.len() * 3)
    }
}

/// Everything the runner needs to know about what to draw.
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: &'static str,
    pub geometry: Geometry,
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
    /// Whether [`COLOR_UNIFORM`] is driven by the frame clock.
    pub animate_color: bool,
}

/// Selects one of the built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// A single static white triangle.
    #[default]
    Triangle,
    /// Two overlapping quads pulsing between black and white.
    Quads,
}

impl Variant {
    /// The window size used when the config does not set one.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Variant::Triangle => (640, 480),
            Variant::Quads => (512, 512),
        }
    }

    pub fn scene(self) -> Result<Scene, RenderError> {
        match self {
            Variant::Triangle => Ok(Scene {
                name: "triangle",
                geometry: Geometry::new(
                    vec![
                        Position([-0.5, -0.5, 0.0]),
                        Position([0.5, -0.5, 0.0]),
                        Position([0.0, 0.5, 0.0]),
                    ],
                    None,
                )?,
                vertex_source: include_str!("shaders/triangle/vert.glsl"),
                fragment_source: include_str!("shaders/triangle/frag.glsl"),
                animate_color: false,
            }),
            Variant::Quads => Ok(Scene {
                name: "quads",
                geometry: Geometry::new(
                    vec![
                        // Lower left quad
                        Position([0.2, 0.2, 0.0]),
                        Position([0.2, -0.8, 0.0]),
                        Position([-0.8, -0.8, 0.0]),
                        Position([-0.8, 0.2, 0.0]),
                        // Upper right quad
                        Position([0.8, 0.8, 0.0]),
                        Position([0.8, -0.2, 0.0]),
                        Position([-0.2, -0.2, 0.0]),
                        Position([-0.2, 0.8, 0.0]),
                    ],
                    Some(vec![[0, 1, 3], [1, 2, 3], [4, 5, 7], [5, 6, 7]]),
                )?,
                vertex_source: include_str!("shaders/pulse/vert.glsl"),
                fragment_source: include_str!("shaders/pulse/frag.glsl"),
                animate_color: true,
            }),
        }
    }
}
