/// File-backed logger; the terminal itself belongs to the renderer
use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::{
    fs::{File, OpenOptions},
    io::Write,
    str::FromStr,
};

pub const LOG_FILE: &str = "geosphere.log";

/// Environment variable holding the level filter (`info` when unset)
pub const LOG_LEVEL_VAR: &str = "GEOSPHERE_LOG";

pub struct Logger {
    file: Mutex<File>,
}

impl Logger {
    pub fn init() -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(LOG_FILE)?;

        Self::install(file, level_from_env(std::env::var(LOG_LEVEL_VAR).ok().as_deref()))
    }

    /// Install a logger writing to `file` as the global `log` backend.
    pub fn install(file: File, level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(Logger {
            file: Mutex::new(file),
        }))?;

        log::set_max_level(level);

        Ok(())
    }
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut file = self.file.lock();
        // A failed log write has nowhere better to go.
        let _ = match (record.file(), record.line()) {
            (Some(path), Some(line)) => writeln!(
                file,
                "{}|{}({}:{}): {}",
                record.level(),
                record.target(),
                path,
                line,
                record.args()
            ),
            _ => writeln!(file, "{}|{}: {}", record.level(), record.target(), record.args()),
        };
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}
