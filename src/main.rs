use std::process::ExitCode;

use anyhow::Context;
use log::LevelFilter;

use crate::abs::App;
use crate::config::Config;
use crate::runner::{RenderOptions, RunSummary, Runner};
use crate::window::WindowState;

mod abs;
mod clock;
mod config;
mod error;
mod logging;
mod runner;
mod scene;
#[cfg(test)]
mod testing;
mod window;

fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let scene = config
        .variant
        .scene()
        .context("failed to build the scene")?;
    let (width, height) = config.window_size();

    let mut app = App::new(&config.window.title, width, height, config.window.vsync)
        .context("failed to acquire a window and an OpenGL context")?;

    let (fb_width, fb_height) = app.drawable_size();
    let mut window = WindowState::new(fb_width, fb_height);
    let options = RenderOptions {
        wireframe: config.wireframe,
    };
    let runner = Runner::new(&app.gl, &scene, &window, &options)
        .context("failed to initialise the renderer")?;
    log::info!(
        "renderer {:?} for scene \"{}\": {} vertices, {} indices, animated color: {}",
        runner.state(),
        scene.name,
        runner.mesh().vertex_count(),
        runner.mesh().index_count(),
        scene.animate_color
    );

    // The runner releases its GPU objects before `app` drops the context.
    Ok(runner.run(&mut app, &mut window))
}

/// Logs the outcome and maps it to the process exit status.
fn report(result: anyhow::Result<RunSummary>) -> u8 {
    match result {
        Ok(summary) => {
            log::info!(
                "exiting after {} frames at {}x{}",
                summary.frames,
                summary.width,
                summary.height
            );
            0
        }
        Err(e) => {
            log::error!("{e:#}");
            1
        }
    }
}

fn main() -> ExitCode {
    let config = Config::load();
    let level = config
        .as_ref()
        .map_or(LevelFilter::Info, |config| config.log_level);
    if let Err(e) = logging::init(level) {
        eprintln!("failed to initialise logging: {e}");
    }

    let result = config
        .context("failed to load the configuration")
        .and_then(|config| run(&config));
    ExitCode::from(report(result))
}
