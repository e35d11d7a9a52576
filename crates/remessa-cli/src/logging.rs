//! Logging setup using `tracing-subscriber`.
//!
//! - `error`: files that failed to convert
//! - `warn`: skipped inputs (default)
//! - `info`: one line per converted file
//! - `debug`: per-sheet counts
//! - `trace`: every reformatted cell
//!
//! `RUST_LOG` takes precedence over the `-v`/`-q` flags.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map `-v` count and `-q` to a level
pub fn level_from_flags(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber, writing to stderr
pub fn init_logging(level: Level) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn
        EnvFilter::new(format!(
            "warn,remessa={level},remessa_cli={level},remessa_core={level},\
             remessa_csv={level},remessa_xlsx={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level_from_flags(0, false), Level::WARN);
        assert_eq!(level_from_flags(1, false), Level::INFO);
        assert_eq!(level_from_flags(2, false), Level::DEBUG);
        assert_eq!(level_from_flags(5, false), Level::TRACE);
        assert_eq!(level_from_flags(3, true), Level::ERROR);
    }
}
