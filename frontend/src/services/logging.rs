use log::{Level, LevelFilter, Log, Metadata, Record};

/// Component-tagged logger writing to the browser console.
///
/// Also installed as the `log` backend so records from `shared` end up in
/// the same place.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::write(Level::Debug, message, Some(component));
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::write(Level::Info, message, Some(component));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::write(Level::Warn, message, Some(component));
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::write(Level::Error, message, Some(component));
    }

    fn write(level: Level, message: &str, component: Option<&str>) {
        let line = match component {
            Some(component) => format!("[{}] {}", component, message),
            None => message.to_string(),
        };

        match level {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            Self::write(record.level(), &record.args().to_string(), Some(record.target()));
        }
    }

    fn flush(&self) {}
}
