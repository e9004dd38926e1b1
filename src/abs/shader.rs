//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::fmt;
use std::sync::Arc;

use glam::Vec4;

use super::Gpu;
use crate::error::RenderError;

/// The pipeline stage a [`Shader`] is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader<G: Gpu> {
    gl: Arc<G>,
    id: G::Shader,
}

impl<G: Gpu> Shader<G> {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<G>, stage: ShaderStage, source: &str) -> Result<Self, RenderError> {
        let shader = gl.create_shader(stage).map_err(RenderError::Resource)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RenderError::Compile { stage, log });
        }

        log::debug!("compiled {stage} shader {shader:?}");
        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
        })
    }
}

impl<G: Gpu> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to an already resolved uniform location of the bound program.
    fn set_uniform<G: Gpu>(&self, gl: &G, location: &G::UniformLocation);
}

impl Uniform for f32 {
    fn set_uniform<G: Gpu>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec4 {
    fn set_uniform<G: Gpu>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_4_f32(location, *self);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram<G: Gpu> {
    gl: Arc<G>,
    id: G::Program,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self, RenderError> {
        let program = gl.create_program().map_err(RenderError::Resource)?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(RenderError::Link(log));
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        log::debug!("linked program {program:?} from {} shaders", shaders.len());
        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
        })
    }

    /// Compiles a vertex and a fragment stage and links them.
    ///
    /// The intermediate shader objects are released before this returns, whether or not
    /// linking succeeded.
    pub fn from_sources(gl: &Arc<G>, vertex: &str, fragment: &str) -> Result<Self, RenderError> {
        let vert = Shader::new(gl, ShaderStage::Vertex, vertex)?;
        let frag = Shader::new(gl, ShaderStage::Fragment, fragment)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.id));
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.gl.uniform_location(self.id, name).is_some()
    }

    /// Sets a uniform variable in the shader program. The program must be bound.
    ///
    /// Unknown names are skipped, the same way OpenGL ignores location `-1`.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.gl.uniform_location(self.id, name) {
            value.set_uniform(&*self.gl, &location);
        }
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
