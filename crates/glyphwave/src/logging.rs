//! File logging setup.
//!
//! The terminal belongs to the UI, so log output only goes to the configured file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use glyphwave_config::Config;
use tracing::Level;

/// Environment variable overriding the configured log level.
const LOG_ENV: &str = "GLYPHWAVE_LOG";

/// Install the global subscriber when a log file is configured.
pub fn init(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let level = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| config.log_level.clone())
        .map(|name| parse_level(&name))
        .unwrap_or(Level::INFO);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" TRACE "), Level::TRACE);
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
