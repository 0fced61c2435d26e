use crate::error::{Result, ValidationError};
use crate::{debug_log, info_log};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE_PREFIX: &str = "session-";
const LOG_FILE_EXTENSION: &str = "txt";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub guess: String,
    pub outcome: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.guess, self.outcome)
    }
}

/// In-memory transcript of one session, written out once at the end.
#[derive(Debug, Default, Clone)]
pub struct SessionLog {
    records: Vec<LogRecord>,
}

impl SessionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, guess: impl Into<String>, outcome: impl fmt::Display) {
        let record = LogRecord {
            guess: guess.into(),
            outcome: outcome.to_string(),
        };
        debug_log!("Session log += {}", record);
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One `guess | outcome` line per record, each ending in a newline.
    #[must_use]
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{record}\n"))
            .collect()
    }
}

/// Writes each session's transcript to its own file in a log directory.
#[derive(Debug)]
pub struct SessionLogWriter {
    directory: PathBuf,
}

impl SessionLogWriter {
    /// Use `directory`, creating it if needed.
    pub fn new<P: Into<PathBuf>>(directory: P) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .map_err(|e| ValidationError::io("Failed to create log directory.", e))?;
        Ok(Self { directory })
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn write(&self, log: &SessionLog) -> Result<PathBuf> {
        self.write_at(log, Local::now())
    }

    /// Write `log` to a new file named after `timestamp`. A file that already
    /// exists is never reused; a numeric suffix is added instead.
    pub fn write_at(&self, log: &SessionLog, timestamp: DateTime<Local>) -> Result<PathBuf> {
        let content = log.render();
        if content.trim().is_empty() {
            return Err(ValidationError::new(
                "Log content cannot be blank or whitespace-only.",
            ));
        }

        let stem = format!("{LOG_FILE_PREFIX}{}", timestamp.format(TIMESTAMP_FORMAT));
        let mut suffix = 0u32;
        loop {
            let path = self.directory.join(log_file_name(&stem, suffix));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(file, &path, &content)?;
                    info_log!("Wrote {} log records to {}", log.len(), path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug_log!("{} already exists, trying next suffix", path.display());
                    suffix += 1;
                }
                Err(e) => return Err(ValidationError::io("Failed to write log entry.", e)),
            }
        }
    }
}

/// Write `content` to a freshly created file, removing the file again if the
/// write fails so no truncated transcript is left behind.
fn write_or_discard<W: Write>(mut file: W, path: &Path, content: &str) -> Result<()> {
    let result = file.write_all(content.as_bytes()).and_then(|()| file.flush());
    drop(file);
    if let Err(e) = result {
        if let Err(remove_err) = fs::remove_file(path) {
            debug_log!("Failed to remove partial log {}: {}", path.display(), remove_err);
        }
        return Err(ValidationError::io("Failed to write log entry.", e));
    }
    Ok(())
}

fn log_file_name(stem: &str, suffix: u32) -> String {
    if suffix == 0 {
        format!("{stem}.{LOG_FILE_EXTENSION}")
    } else {
        format!("{stem}-{suffix}.{LOG_FILE_EXTENSION}")
    }
}
