//! Window state and the input provider seam.
//!
//! Platform callbacks are delivered as a queue of [`WindowEvent`]s drained once per frame
//! and folded into an owned [`WindowState`].

/// Keys the runner reacts to. Everything else is carried by name for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Pressed,
    Released,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The framebuffer was resized to the given dimensions.
    Resized { width: u32, height: u32 },
    Key { key: Key, action: KeyAction },
    /// The window manager asked the window to close.
    CloseRequested,
}

/// A GL viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Window dimensions and the close flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub close_requested: bool,
}

impl WindowState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            close_requested: false,
        }
    }

    /// The viewport covering the whole window.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            x: 0,
            y: 0,
            width: self.width as i32,
            height: self.height as i32,
        }
    }

    /// Folds an event into the state.
    ///
    /// Returns the new viewport when the dimensions changed. Resizes with a zero dimension
    /// (a minimized window) are ignored.
    pub fn apply(&mut self, event: &WindowEvent) -> Option<Viewport> {
        match event {
            WindowEvent::Resized { width, height } => {
                if *width == 0 || *height == 0 {
                    return None;
                }
                if (*width, *height) == (self.width, self.height) {
                    return None;
                }
                self.width = *width;
                self.height = *height;
                Some(self.viewport())
            }
            WindowEvent::Key {
                key: Key::Escape,
                action: KeyAction::Pressed,
            }
            | WindowEvent::CloseRequested => {
                self.close_requested = true;
                None
            }
            WindowEvent::Key { key, action } => {
                let name = match key {
                    Key::Escape => "Escape",
                    Key::Other(name) => name.as_str(),
                };
                log::trace!("ignoring key {name} ({action:?})");
                None
            }
        }
    }
}

/// The window/input provider the frame loop runs against.
pub trait Platform {
    /// Drains the events that arrived since the previous call.
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Seconds since the provider was created. Never decreases.
    fn elapsed_seconds(&self) -> f64;

    /// Presents the back buffer.
    fn swap_buffers(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_dimensions_and_viewport() {
        let mut state = WindowState::new(640, 480);
        let viewport = state.apply(&WindowEvent::Resized {
            width: 800,
            height: 600,
        });
        assert_eq!(
            viewport,
            Some(Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600,
            })
        );
        assert_eq!((state.width, state.height), (800, 600));
    }

    #[test]
    fn test_zero_sized_resize_is_ignored() {
        let mut state = WindowState::new(640, 480);
        assert_eq!(
            state.apply(&WindowEvent::Resized {
                width: 0,
                height: 0,
            }),
            None
        );
        assert_eq!(
            state.apply(&WindowEvent::Resized {
                width: 300,
                height: 0,
            }),
            None
        );
        assert_eq!((state.width, state.height), (640, 480));
    }

    #[test]
    fn test_same_size_resize_yields_no_viewport() {
        let mut state = WindowState::new(640, 480);
        assert_eq!(
            state.apply(&WindowEvent::Resized {
                width: 640,
                height: 480,
            }),
            None
        );
    }

    #[test]
    fn test_escape_press_requests_close() {
        let mut state = WindowState::new(640, 480);
        state.apply(&WindowEvent::Key {
            key: Key::Escape,
            action: KeyAction::Released,
        });
        assert!(!state.close_requested);
        state.apply(&WindowEvent::Key {
            key: Key::Other("Q".to_string()),
            action: KeyAction::Pressed,
        });
        assert!(!state.close_requested);
        state.apply(&WindowEvent::Key {
            key: Key::Escape,
            action: KeyAction::Pressed,
        });
        assert!(state.close_requested);
    }

    #[test]
    fn test_close_requested_event() {
        let mut state = WindowState::new(640, 480);
        state.apply(&WindowEvent::CloseRequested);
        assert!(state.close_requested);
    }
}
