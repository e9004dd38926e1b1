//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;
use std::time::Instant;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::video::SwapInterval;

use crate::error::RenderError;
use crate::window::{Key, KeyAction, Platform, WindowEvent};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Dropping it releases the context and the window, so it must outlive every GPU object
/// created through [`App::gl`].
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    started: Instant,
}

impl App {
    /// Creates a new [`App`] with an OpenGL 3.3 core context and a resizable window.
    ///
    /// `vsync` is left to the driver when `None`.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        vsync: Option<bool>,
    ) -> Result<Self, RenderError> {
        let sdl = sdl2::init().map_err(RenderError::Context)?;
        let video_subsystem = sdl.video().map_err(RenderError::Context)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| RenderError::Context(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(RenderError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(RenderError::Context)?;

        if let Some(vsync) = vsync {
            let interval = if vsync {
                SwapInterval::VSync
            } else {
                SwapInterval::Immediate
            };
            if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
                log::warn!("could not set swap interval: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(RenderError::Context)?;
        let gl = Arc::new(gl);

        log::info!("opened {width}x{height} window \"{title}\" with an OpenGL 3.3 core context");

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
            started: Instant::now(),
        })
    }

    /// The framebuffer size, which differs from the window size on high-DPI displays.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}

impl Platform for App {
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let window = &self.window;
        self.event_pump
            .poll_iter()
            .filter_map(|event| translate_event(event, window))
            .collect()
    }

    fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }
}

fn translate_event(event: Event, window: &sdl2::video::Window) -> Option<WindowEvent> {
    match event {
        Event::Quit { .. } => Some(WindowEvent::CloseRequested),
        Event::Window {
            win_event:
                sdl2::event::WindowEvent::Resized(..) | sdl2::event::WindowEvent::SizeChanged(..),
            ..
        } => {
            let (width, height) = window.drawable_size();
            Some(WindowEvent::Resized { width, height })
        }
        Event::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => Some(WindowEvent::Key {
            key: translate_key(keycode),
            action: KeyAction::Pressed,
        }),
        Event::KeyUp {
            keycode: Some(keycode),
            ..
        } => Some(WindowEvent::Key {
            key: translate_key(keycode),
            action: KeyAction::Released,
        }),
        _ => None,
    }
}

fn translate_key(keycode: Keycode) -> Key {
    if keycode == Keycode::Escape {
        Key::Escape
    } else {
        Key::Other(keycode.name())
    }
}
