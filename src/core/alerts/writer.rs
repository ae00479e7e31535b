//! Line-oriented sink over any writer (stdout by default).

use std::io::{self, Write};

use crate::core::monitor::AlertSink;
use crate::error::Result;

/// Writes each alert as one line. Status updates are written as
/// `<job>: <status>` only when enabled.
pub struct WriterSink<W: Write + Send> {
    label: String,
    out: W,
    show_status: bool,
}

/// Console sink
pub type ConsoleSink = WriterSink<io::Stdout>;

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new("console", io::stdout())
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new<S: Into<String>>(label: S, out: W) -> Self {
        Self {
            label: label.into(),
            out,
            show_status: false,
        }
    }

    pub fn with_status(mut self, show_status: bool) -> Self {
        self.show_status = show_status;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> AlertSink for WriterSink<W> {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn log_alert(&mut self, message: &str, _job_name: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn update_status(&mut self, status: &str, job_name: &str) -> Result<()> {
        if self.show_status {
            writeln!(self.out, "{}: {}", job_name, status)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
