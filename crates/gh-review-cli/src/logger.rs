//! Terminal logging using simplelog
//!
//! Logs go to stderr so the JSON written to stdout stays machine-readable.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Map a level name to a filter, defaulting to Info for unknown names
pub fn level_from_name(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Pick the active level; an explicit `RUST_LOG` value wins over the fallback
fn resolve_level(rust_log: Option<&str>, fallback: &str) -> LevelFilter {
    level_from_name(rust_log.unwrap_or(fallback))
}

fn rust_log() -> Option<String> {
    std::env::var("RUST_LOG").ok()
}

/// Initialize stderr logging
///
/// Starts at the `RUST_LOG` level (Info when unset) so messages emitted while
/// loading the configuration are not lost.
pub fn init() -> anyhow::Result<()> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    TermLogger::init(LevelFilter::Trace, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    log::set_max_level(resolve_level(rust_log().as_deref(), "info"));
    Ok(())
}

/// Apply the level from the configuration file
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn apply_configured_level(configured_level: &str) {
    log::set_max_level(resolve_level(rust_log().as_deref(), configured_level));
}
