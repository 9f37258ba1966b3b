//! Result log shared by all workflows.
//!
//! Everything a run reports (counts, percentages, candidate lists, deletions) goes
//! through a [`LogSink`]. The binary uses [`ConsoleAndFileSink`], which prints each line
//! and appends it with a timestamp to a flat log file. Tests use [`MemorySink`].
//!
//! Diagnostics that are not part of the run record (spawned commands, stage changes)
//! go through the `log` facade instead.

use crate::core::error::{CleanupError, Result};
use colored::*;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Console presentation of a line; the file record is always plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Header,
    Warning,
    Error,
    Deleted,
    Separator,
}

pub trait LogSink {
    fn write_styled(&mut self, line: &str, style: LineStyle) -> Result<()>;

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.write_styled(line, LineStyle::Plain)
    }
}

/// Prints to stdout and appends `"{timestamp}|{line}"` to a log file
#[derive(Debug)]
pub struct ConsoleAndFileSink {
    path: PathBuf,
}

impl ConsoleAndFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| CleanupError::log_write_failed(&self.path, e))?;

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "{timestamp}|{line}")
            .map_err(|e| CleanupError::log_write_failed(&self.path, e))
    }
}

/// Console rendering of `line`. Plain report lines keep the terminal's own color.
fn render(line: &str, style: LineStyle) -> String {
    match style {
        LineStyle::Plain => line.to_string(),
        LineStyle::Header => format!("\n{}", line.blue().bold()),
        LineStyle::Warning => line.yellow().to_string(),
        LineStyle::Error => line.red().to_string(),
        LineStyle::Deleted => line.green().to_string(),
        LineStyle::Separator => line.bright_black().to_string(),
    }
}

impl LogSink for ConsoleAndFileSink {
    fn write_styled(&mut self, line: &str, style: LineStyle) -> Result<()> {
        println!("{}", render(line, style));
        self.append(line)
    }
}

/// In-memory sink recording every line with its style
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<(LineStyle, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, line)| line.as_str()).collect()
    }

    pub fn lines_with_style(&self, style: LineStyle) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(s, _)| *s == style)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|(_, line)| line.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn write_styled(&mut self, line: &str, style: LineStyle) -> Result<()> {
        self.entries.push((style, line.to_string()));
        Ok(())
    }
}
