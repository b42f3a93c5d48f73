//! Logging setup.
//!
//! Everything in the workspace logs through the `log` facade; this module
//! installs a `fern` dispatcher that prints `[uptime level target] message`
//! lines to stdout.  Call [`init`] once, early in `main`.

use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use log::LevelFilter;

use crate::error::AppError;

static START: OnceLock<Instant> = OnceLock::new();

/// Seconds since the logger clock started (first call starts it).
fn uptime() -> f32 {
    START.get_or_init(Instant::now).elapsed().as_secs_f32()
}

/// Resolve the effective level: `RUST_LOG` wins over the configured one,
/// and anything unparsable falls back to `info`.
pub fn resolve_level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(|s| s.trim().parse().ok())
        .or_else(|| configured.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the global logger.
pub fn init(configured_level: &str) -> Result<(), AppError> {
    let env = std::env::var("RUST_LOG").ok();
    let level = resolve_level(configured_level, env.as_deref());
    // start the clock at install time
    uptime();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:>8.3}s {:<5} {}] {}",
                uptime(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // windowing backends are chatty at debug level
        .level_for("winit", LevelFilter::Warn)
        .level_for("calloop", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_config() {
        assert_eq!(resolve_level("info", Some("debug")), LevelFilter::Debug);
        assert_eq!(resolve_level("warn", None), LevelFilter::Warn);
        assert_eq!(resolve_level("nonsense", Some("also nonsense")), LevelFilter::Info);
        assert_eq!(resolve_level(" TRACE ", None), LevelFilter::Trace);
    }

    #[test]
    fn uptime_never_goes_backwards() {
        let first = uptime();
        let second = uptime();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
