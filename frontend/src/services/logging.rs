//! Logger installation. Controllers log through the `log` facade with one
//! target per component (`bills`, `new_bill`, `store`, `session`); the host
//! installs a backend once at startup.

use log::LevelFilter;

/// Install the platform logger. Returns false if a logger was already set.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) -> bool {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .is_ok()
}

/// Install the platform logger. Returns false if a logger was already set.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) -> bool {
    static LOGGER: ConsoleLogger = ConsoleLogger;
    match log::set_logger(&LOGGER) {
        Ok(()) => {
            log::set_max_level(level);
            true
        }
        Err(_) => false,
    }
}

/// Forwards records to the browser console
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => gloo::console::error!(line),
            log::Level::Warn => gloo::console::warn!(line),
            log::Level::Info => gloo::console::info!(line),
            log::Level::Debug | log::Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}
