//! The frame loop.
//!
//! [`Runner`] owns the shader program and the mesh for one [`Scene`]. It is created after the
//! platform has acquired a context ([`Runner::new`]), renders until the [`WindowState`] close
//! flag is seen at the top of an iteration ([`Runner::run`]) and then releases its GPU objects
//! exactly once ([`Runner::shutdown`], which consumes it).

use std::sync::Arc;

use glam::Vec4;

use crate::abs::{Gpu, Mesh, ShaderProgram};
use crate::clock::{FrameClock, FrameTime, pulse_intensity};
use crate::error::RenderError;
use crate::scene::{COLOR_UNIFORM, Scene};
use crate::window::{Platform, WindowState};

/// Sky blue.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.529, 0.808, 0.980, 1.0);

const CLEAR_MASK: u32 = glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub wireframe: bool,
}

/// Lifecycle of a [`Runner`]. Before [`Runner::new`] succeeds there is no runner at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Initialized and rendering frames.
    Ready,
    ShuttingDown,
    Terminated,
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub width: u32,
    pub height: u32,
}

pub struct Runner<G: Gpu> {
    gl: Arc<G>,
    program: ShaderProgram<G>,
    mesh: Mesh<G>,
    animate_color: bool,
    clock: FrameClock,
    state: RunnerState,
    frames: u64,
}

impl<G: Gpu> Runner<G> {
    /// Sets the initial viewport, builds the shader program and uploads the scene geometry.
    pub fn new(
        gl: &Arc<G>,
        scene: &Scene,
        window: &WindowState,
        options: &RenderOptions,
    ) -> Result<Self, RenderError> {
        let viewport = window.viewport();
        gl.viewport(viewport.x, viewport.y, viewport.width, viewport.height);

        let program = ShaderProgram::from_sources(gl, scene.vertex_source, scene.fragment_source)?;
        if scene.animate_color && !program.has_uniform(COLOR_UNIFORM) {
            return Err(RenderError::MissingUniform(COLOR_UNIFORM.to_string()));
        }

        log::debug!(
            "uploading {} vertices and {} indices for scene \"{}\"",
            scene.geometry.vertex_count(),
            scene.geometry.index_count(),
            scene.name
        );
        let mesh = Mesh::new(
            gl,
            scene.geometry.positions(),
            scene.geometry.indices(),
            glow::TRIANGLES,
        )?;

        if options.wireframe {
            gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            mesh,
            animate_color: scene.animate_color,
            clock: FrameClock::new(),
            state: RunnerState::Ready,
            frames: 0,
        })
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn mesh(&self) -> &Mesh<G> {
        &self.mesh
    }

    fn transition(&mut self, next: RunnerState) {
        log::debug!("runner {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Updates the color uniform, clears and issues the draw call. Does not present.
    pub fn render_step(&mut self, time: &FrameTime) {
        if self.animate_color {
            let intensity = pulse_intensity(time.elapsed);
            self.program.use_program();
            self.program.set_uniform(
                COLOR_UNIFORM,
                Vec4::new(intensity, intensity, intensity, 1.0),
            );
        }

        self.gl.clear_color(CLEAR_COLOR);
        self.gl.clear(CLEAR_MASK);

        self.program.use_program();
        self.mesh.draw();
    }

    /// Polls, renders and presents until the window asks to close, then shuts down.
    pub fn run<P: Platform>(mut self, platform: &mut P, window: &mut WindowState) -> RunSummary {
        while !window.close_requested {
            for event in platform.poll_events() {
                if let Some(viewport) = window.apply(&event) {
                    log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
                    self.gl
                        .viewport(viewport.x, viewport.y, viewport.width, viewport.height);
                }
            }

            let time = self.clock.tick(platform.elapsed_seconds());
            log::trace!(
                "frame {} at {:.3}s ({:.2}ms)",
                time.frame_index,
                time.elapsed,
                time.delta * 1000.0
            );

            self.render_step(&time);
            platform.swap_buffers();
            self.frames += 1;
        }

        self.shutdown(window)
    }

    /// Releases the mesh and the program.
    pub fn shutdown(mut self, window: &WindowState) -> RunSummary {
        self.transition(RunnerState::ShuttingDown);

        let Runner {
            program,
            mesh,
            frames,
            ..
        } = self;
        drop(mesh);
        drop(program);

        log::info!("released GPU resources after {frames} frames");
        log::debug!(
            "runner {:?} -> {:?}",
            RunnerState::ShuttingDown,
            RunnerState::Terminated
        );
        RunSummary {
            frames,
            width: window.width,
            height: window.height,
        }
    }
}
