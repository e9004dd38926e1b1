//! This module contains the thin OpenGL layer the renderer is built on,
//! including application setup, GPU command submission, shader management and mesh handling.

pub mod app;
pub mod gpu;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use gpu::*;
pub use mesh::*;
pub use shader::*;
