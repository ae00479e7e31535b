//! Append alerts to a file.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::monitor::AlertSink;
use crate::error::{Result, WatchError};

const TIME_PREFIX: &str = "%m/%d/%y %H:%M:%S: ";

/// Appends one `\r\n`-terminated line per alert, optionally prefixed with
/// the local time. The file is closed by `finish`.
pub struct FileSink {
    path: PathBuf,
    file: Option<BufWriter<File>>,
    include_time: bool,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P, include_time: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Some(BufWriter::new(file)),
            include_time,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AlertSink for FileSink {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn log_alert(&mut self, message: &str, _job_name: &str) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| WatchError::sink(format!("{} is already closed", self.path.display())))?;

        if self.include_time {
            write!(file, "{}", Local::now().format(TIME_PREFIX))?;
        }
        write!(file, "{}\r\n", message)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}
