//! Test doubles for the GPU and the platform.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use glam::Vec4;

use crate::abs::{Gpu, ShaderStage};
use crate::window::{Platform, WindowEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    UseProgram(Option<u32>),
    Uniform1 { name: String, value: f32 },
    Uniform4 { name: String, value: [f32; 4] },
    BufferData { target: u32, len: usize },
    DrawArrays { mode: u32, first: i32, count: i32 },
    DrawElements { mode: u32, count: i32 },
    PolygonMode(u32, u32),
    /// Recorded by a [`ScriptedPlatform`] built with [`ScriptedPlatform::presenting_to`].
    SwapBuffers,
}

#[derive(Default)]
struct State {
    next_id: u32,
    shaders: HashMap<u32, String>,
    programs: HashMap<u32, Vec<u32>>,
    linked_sources: HashMap<u32, String>,
    buffers: HashSet<u32>,
    vertex_arrays: HashSet<u32>,
    double_frees: usize,
    fail_link: Option<String>,
    calls: Vec<Call>,
}

impl State {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// A [`Gpu`] that tracks object lifetimes and records state-changing calls.
///
/// A shader compiles when its source contains `void main`. A program exposes a uniform
/// when one of its linked sources declares ` <name>;`.
#[derive(Default)]
pub struct RecordingGpu {
    state: Mutex<State>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn record(&self, call: Call) {
        self.with(|s| s.calls.push(call));
    }

    pub fn fail_next_link(&self, log: &str) {
        self.with(|s| s.fail_link = Some(log.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|s| s.calls.clone())
    }

    pub fn clear_calls(&self) {
        self.with(|s| s.calls.clear());
    }

    pub fn live_shaders(&self) -> usize {
        self.with(|s| s.shaders.len())
    }

    pub fn live_programs(&self) -> usize {
        self.with(|s| s.programs.len())
    }

    pub fn live_buffers(&self) -> usize {
        self.with(|s| s.buffers.len())
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.with(|s| s.vertex_arrays.len())
    }

    pub fn double_frees(&self) -> usize {
        self.with(|s| s.double_frees)
    }
}

impl Gpu for RecordingGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = String;

    fn create_shader(&self, _stage: ShaderStage) -> Result<u32, String> {
        Ok(self.with(|s| {
            let id = s.next();
            s.shaders.insert(id, String::new());
            id
        }))
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.with(|s| {
            if let Some(src) = s.shaders.get_mut(&shader) {
                *src = source.to_string();
            }
        });
    }

    fn compile_shader(&self, _shader: u32) {}

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.with(|s| s.shaders.get(&shader).is_some_and(|src| src.contains("void main")))
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "0:1(1): error: syntax error, unexpected NEW_IDENTIFIER".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.with(|s| {
            if s.shaders.remove(&shader).is_none() {
                s.double_frees += 1;
            }
        });
    }

    fn create_program(&self) -> Result<u32, String> {
        Ok(self.with(|s| {
            let id = s.next();
            s.programs.insert(id, Vec::new());
            id
        }))
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.with(|s| {
            if let Some(attached) = s.programs.get_mut(&program) {
                attached.push(shader);
            }
        });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.with(|s| {
            if let Some(attached) = s.programs.get_mut(&program) {
                attached.retain(|&id| id != shader);
            }
        });
    }

    fn link_program(&self, program: u32) {
        self.with(|s| {
            let sources = s.programs.get(&program).map(|attached| {
                attached
                    .iter()
                    .filter_map(|id| s.shaders.get(id))
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            if let Some(sources) = sources {
                s.linked_sources.insert(program, sources);
            }
        });
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.with(|s| s.fail_link.is_none())
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.with(|s| s.fail_link.take().unwrap_or_default())
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.with(|s| {
            s.linked_sources.remove(&program);
            if s.programs.remove(&program).is_none() {
                s.double_frees += 1;
            }
        });
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<String> {
        self.with(|s| {
            s.linked_sources
                .get(&program)
                .filter(|src| src.contains(&format!(" {name};")))
                .map(|_| name.to_string())
        })
    }

    fn uniform_1_f32(&self, location: &String, x: f32) {
        self.record(Call::Uniform1 {
            name: location.clone(),
            value: x,
        });
    }

    fn uniform_4_f32(&self, location: &String, value: Vec4) {
        self.record(Call::Uniform4 {
            name: location.clone(),
            value: value.to_array(),
        });
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        Ok(self.with(|s| {
            let id = s.next();
            s.vertex_arrays.insert(id);
            id
        }))
    }

    fn bind_vertex_array(&self, _vertex_array: Option<u32>) {}

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.with(|s| {
            if !s.vertex_arrays.remove(&vertex_array) {
                s.double_frees += 1;
            }
        });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        Ok(self.with(|s| {
            let id = s.next();
            s.buffers.insert(id);
            id
        }))
    }

    fn bind_buffer(&self, _target: u32, _buffer: Option<u32>) {}

    fn buffer_data(&self, target: u32, data: &[u8], _usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.with(|s| {
            if !s.buffers.remove(&buffer) {
                s.double_frees += 1;
            }
        });
    }

    fn vertex_attrib_pointer_f32(&self, _index: u32, _size: i32, _stride: i32, _offset: i32) {}

    fn enable_vertex_attrib_array(&self, _index: u32) {}

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }

    fn draw_elements(&self, mode: u32, count: i32, _offset: i32) {
        self.record(Call::DrawElements { mode, count });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: Vec4) {
        self.record(Call::ClearColor(color.to_array()));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn polygon_mode(&self, face: u32, mode: u32) {
        self.record(Call::PolygonMode(face, mode));
    }
}

/// A [`Platform`] that replays one batch of events per poll.
///
/// Panics when polled past the end of its script plus `grace` empty frames, so a loop that
/// fails to stop ends the test instead of hanging it.
pub struct ScriptedPlatform {
    script: VecDeque<Vec<WindowEvent>>,
    grace: usize,
    time: f64,
    step: f64,
    gpu: Option<Arc<RecordingGpu>>,
    pub polls: usize,
    pub swaps: usize,
}

impl ScriptedPlatform {
    pub fn new(script: Vec<Vec<WindowEvent>>) -> Self {
        Self {
            script: script.into(),
            grace: 0,
            time: 0.0,
            step: 1.0 / 60.0,
            gpu: None,
            polls: 0,
            swaps: 0,
        }
    }

    /// Also records each swap in `gpu`'s call list, so presents can be ordered against draws.
    pub fn presenting_to(mut self, gpu: &Arc<RecordingGpu>) -> Self {
        self.gpu = Some(Arc::clone(gpu));
        self
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.polls += 1;
        self.time += self.step;
        match self.script.pop_front() {
            Some(events) => events,
            None if self.grace < 100 => {
                self.grace += 1;
                Vec::new()
            }
            None => panic!("frame loop did not stop after its script ended"),
        }
    }

    fn elapsed_seconds(&self) -> f64 {
        self.time
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
        if let Some(gpu) = &self.gpu {
            gpu.record(Call::SwapBuffers);
        }
    }
}
