use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::LoggingConfig;

/// Route the `log` facade to the configured file.
///
/// Best-effort: the terminal is in raw mode, so nothing is ever logged there,
/// and an unusable log file just leaves logging disabled. `verbose` forces
/// debug level.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(&config.level)
    };
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path(&config.file) else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let log_config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = WriteLogger::init(level, log_config, file);
}

/// Level name to filter; unknown names fall back to `warn`.
fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Warn)
}

/// Expanded log file path, or `None` when logging to a file is disabled.
fn log_path(file: &str) -> Option<PathBuf> {
    let file = file.trim();
    if file.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(file).as_ref()))
}
