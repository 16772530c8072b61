mod init;
pub use init::{init_logging, parse_rotation};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;
/// Log filename used by the command-line tool.
pub const LOG_FILENAME: &str = "photo-gallery.log";
/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
    /// Mirror events to stderr. stdout is kept for command output.
    pub console: bool,
}
impl LogConfig {
    /// Path of the log file being written now, for error reports.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_file_at(Utc::now())
    }
    /// Path the rolling appender writes to at `now`: [`LOG_FILENAME`] with a
    /// UTC date suffix matching the rotation period.
    #[must_use]
    pub fn log_file_at(&self, now: DateTime<Utc>) -> PathBuf {
        let suffix = if self.rotation == Rotation::MINUTELY {
            Some("%Y-%m-%d-%H-%M")
        } else if self.rotation == Rotation::HOURLY {
            Some("%Y-%m-%d-%H")
        } else if self.rotation == Rotation::DAILY {
            Some("%Y-%m-%d")
        } else {
            None
        };
        match suffix {
            Some(format) => self
                .log_dir
                .join(format!("{LOG_FILENAME}.{}", now.format(format))),
            None => self.log_dir.join(LOG_FILENAME),
        }
    }
}
impl Default for LogConfig {
    fn default() -> Self {
        let log_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".photo-gallery")
            .join("logs");
        Self {
            log_dir,
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
            console: false,
        }
    }
}
