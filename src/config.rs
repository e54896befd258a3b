use std::path::PathBuf;

/// File name of the backing store when no path is configured.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Backing store, resolved relative to the working directory when not absolute.
    pub log_path: PathBuf,
    /// Print the confirmation message to stdout after each run.
    pub announce: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            announce: true,
        }
    }
}

impl RecorderConfig {
    pub fn with_log_path(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            ..Default::default()
        }
    }

    pub fn quiet(mut self) -> Self {
        self.announce = false;
        self
    }
}
