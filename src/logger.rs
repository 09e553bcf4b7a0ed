use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

// Progress goes to stdout; diagnostics go here (stderr) so they don't interleave with it
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_line(level: Level, line: &str) -> String {
    format!("[{}] {}: {}", timestamp(), level, line)
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(std::io::stderr(), "{}", format_line(record.level(), &record.args().to_string()));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs the logger once; later calls are no-ops.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
