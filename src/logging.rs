// src/logging.rs
//! Console logger installation.
//!
//! The library itself only talks to the `log` facade. This module exists
//! for callers (and the CLI) that want a ready-made log4rs console logger.

use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

/// Installs a stdout logger at `level`.
///
/// Returns `false` when a logger was already installed; the existing one is
/// left in place.
pub fn init_console(level: LevelFilter) -> bool {
    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = match Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .build(Root::builder().appender("stdout").build(level))
    {
        Ok(config) => config,
        Err(e) => {
            log::debug!("Could not build console logger config: {}", e);
            return false;
        }
    };

    match log4rs::init_config(config) {
        Ok(_) => {
            log::debug!("Console logging initialized at {}", level);
            true
        }
        Err(e) => {
            log::debug!("Logger already installed, keeping it: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_ignored() {
        init_console(LevelFilter::Warn);
        assert!(!init_console(LevelFilter::Debug));
    }
}
