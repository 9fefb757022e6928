// Mon Oct 19 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct LoggingUtils;

impl LoggingUtils {
    pub fn init_logger(level: LevelFilter, use_color: bool) {
        let logger = Box::new(ColoredLogger::new(level, use_color));
        log::set_boxed_logger(logger).ok();
        log::set_max_level(level);
    }

    pub fn init_logger_with_file(level: LevelFilter, file_path: &Path) -> std::io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        let logger = Box::new(FileLogger::new(level, file));
        log::set_boxed_logger(logger).ok();
        log::set_max_level(level);
        Ok(())
    }

    /// Defers to `RUST_LOG` when it is set, falling back to `default_level`.
    pub fn init_from_env(default_level: LevelFilter) {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level.as_str().to_lowercase()),
        )
        .format_timestamp(None)
        .try_init()
        .ok();
    }

    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct ColoredLogger {
    level: LevelFilter,
    use_color: bool,
}

impl ColoredLogger {
    fn new(level: LevelFilter, use_color: bool) -> Self {
        Self { level, use_color }
    }

    fn format_level(&self, level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = short_target(record.target());
        if self.use_color {
            eprintln!(
                "{} {} {}",
                self.format_level(record.level()),
                format!("[{}]", target).dimmed(),
                record.args()
            );
        } else {
            eprintln!("{:5} [{}] {}", record.level(), target, record.args());
        }
    }

    fn flush(&self) {}
}

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    fn new(level: LevelFilter, file: File) -> Self {
        Self {
            level,
            file: Mutex::new(file),
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format!(
                "{} {:5} [{}] {}\n",
                unix_timestamp(),
                record.level(),
                record.target(),
                record.args()
            );
            let _ = self.file.lock().write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// Last module path segment, so `xenon_form_recovery::scan::scanner` prints as `scanner`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", duration.as_secs(), duration.subsec_millis())
}

pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}
