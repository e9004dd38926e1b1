//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use bytemuck::Pod;

use super::Gpu;
use crate::error::RenderError;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs<G: Gpu>(gl: &G);
}

/// Represents a mesh stored on the GPU side.
///
/// Data is uploaded once with `STATIC_DRAW`. Without indices the mesh draws its vertices as
/// a plain triangle list.
pub struct Mesh<G: Gpu> {
    gl: Arc<G>,
    draw_mode: u32,
    vao: G::VertexArray,
    vbo: G::Buffer,
    ebo: Option<G::Buffer>,
    vertex_count: usize,
    index_count: usize,
}

impl<G: Gpu> Mesh<G> {
    /// Creates a new mesh from the given vertex and optional index data.
    pub fn new<V: Vertex>(
        gl: &Arc<G>,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, RenderError> {
        let vao = gl.create_vertex_array().map_err(RenderError::Resource)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(RenderError::Resource(e));
            }
        };
        let ebo = match indices.map(|_| gl.create_buffer()).transpose() {
            Ok(ebo) => ebo,
            Err(e) => {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
                return Err(RenderError::Resource(e));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        if let (Some(ebo), Some(indices)) = (ebo, indices) {
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
        }

        V::vertex_attribs(&**gl);

        // The element buffer binding is part of the vertex array state, so it must stay
        // bound until the vertex array is unbound.
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        Ok(Self {
            gl: Arc::clone(gl),
            draw_mode,
            vao,
            vbo,
            ebo,
            vertex_count: vertices.len(),
            index_count: indices.map_or(0, <[u32]>::len),
        })
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
        if self.ebo.is_some() {
            self.gl
                .draw_elements(self.draw_mode, self.index_count as i32, 0);
        } else {
            self.gl
                .draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
        }
        self.gl.bind_vertex_array(None);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The number of indices uploaded, zero for a non-indexed mesh.
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.gl.delete_buffer(ebo);
        }
        self.gl.delete_vertex_array(self.vao);
    }
}
