//! Logger setup.
//!
//! Records go to stderr through `fern`, stamped with local time. `ALPHASCAPE_LOG` overrides
//! the configured level (e.g. `ALPHASCAPE_LOG=trace` to see per-frame timing).

use log::LevelFilter;

pub const LOG_ENV: &str = "ALPHASCAPE_LOG";

/// Resolves the effective level from the environment override and the configured level.
fn effective_level(configured: LevelFilter, env: Option<&str>) -> LevelFilter {
    env.and_then(|value| value.trim().parse().ok())
        .unwrap_or(configured)
}

/// Installs the global logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let env = std::env::var(LOG_ENV).ok();
    let level = effective_level(level, env.as_deref());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
