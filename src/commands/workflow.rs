//! Pieces shared by the branch and tag workflows.
//!
//! Both workflows walk every area through the same stages, report runner failures
//! the same way and issue deletions either one ref at a time or in one batch.

use crate::core::{
    area::Area,
    classifier::percentage,
    error::Result,
    refs::RefLine,
    runner::{CommandBatch, CommandOutput, CommandRunner},
    sink::{LineStyle, LogSink},
};
use std::fmt;
use std::path::Path;

pub(crate) const REMOTE: &str = "origin";

const SEPARATOR: &str =
    "-----------------------------------------------------------------------------------";

/// Per-area state machine: every area passes these stages in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Classifying,
    Reporting,
    Deleting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Classifying => "classifying",
            Stage::Reporting => "reporting",
            Stage::Deleting => "deleting",
        };
        f.write_str(name)
    }
}

/// Outcome of processing one area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaReport {
    pub area: Area,
    pub total: usize,
    pub marked: usize,
    pub unmerged: usize,
    pub unsafe_count: usize,
    pub safe: usize,
    /// Names a deletion command was issued for
    pub deleted: Vec<String>,
    /// Set when any runner batch for this area reported errors
    pub had_errors: bool,
}

impl AreaReport {
    pub fn new(area: Area) -> Self {
        Self {
            area,
            total: 0,
            marked: 0,
            unmerged: 0,
            unsafe_count: 0,
            safe: 0,
            deleted: Vec::new(),
            had_errors: false,
        }
    }
}

pub(crate) fn enter_stage(kind: &str, area: Area, stage: Stage) {
    log::debug!("{kind} workflow for {area}: {stage}");
}

/// Log every error line of `output`; returns whether there were any
pub(crate) fn report_failures(
    sink: &mut dyn LogSink,
    area: Area,
    output: &CommandOutput,
) -> Result<bool> {
    if !output.had_errors {
        return Ok(false);
    }

    log::warn!(
        "{} error line(s) from git in {area}, continuing",
        output.errors.len()
    );
    for line in &output.errors {
        sink.write_styled(&format!("{area}: error: {line}"), LineStyle::Error)?;
    }
    Ok(true)
}

pub(crate) fn into_ref_lines(output: CommandOutput) -> Vec<RefLine> {
    output.lines.into_iter().map(RefLine::from).collect()
}

pub(crate) fn write_count(sink: &mut dyn LogSink, label: &str, count: usize) -> Result<()> {
    sink.write_line(&format!("{label}: {count}"))
}

/// Write a percentage line, or nothing when `total` is zero
pub(crate) fn write_percentage(
    sink: &mut dyn LogSink,
    label: &str,
    part: usize,
    total: usize,
) -> Result<()> {
    match percentage(part, total) {
        Some(value) => sink.write_line(&format!("{label}: {value}%")),
        None => {
            log::debug!("Skipping '{label}': no refs found");
            Ok(())
        }
    }
}

pub(crate) fn write_ref_list(
    sink: &mut dyn LogSink,
    area: Area,
    header: &str,
    lines: &[RefLine],
) -> Result<()> {
    sink.write_styled(header, LineStyle::Header)?;
    if lines.is_empty() {
        return sink.write_line(&format!("{area}: (none)"));
    }
    for line in lines {
        sink.write_line(&format!("{area}: {line}"))?;
    }
    Ok(())
}

pub(crate) fn write_separator(sink: &mut dyn LogSink) -> Result<()> {
    sink.write_styled(SEPARATOR, LineStyle::Separator)
}

/// Bare names of `lines` under `prefix`; malformed lines are logged and skipped
pub(crate) fn collect_names(
    sink: &mut dyn LogSink,
    area: Area,
    lines: &[RefLine],
    prefix: &'static str,
) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(lines.len());
    for line in lines {
        match line.bare_name(prefix) {
            Ok(name) => names.push(name.to_string()),
            Err(e) => {
                log::warn!("{e}");
                sink.write_styled(
                    &format!("{area}: Skipping malformed ref line: {line}"),
                    LineStyle::Warning,
                )?;
            }
        }
    }
    Ok(names)
}

/// Issue deletions for `names`, one batch per name or a single batch for all.
///
/// `Deleted: {name}` is written for every name of a batch once it ran, whether or not
/// the runner reported errors for it.
pub(crate) fn delete_in_groups<F>(
    runner: &mut dyn CommandRunner,
    sink: &mut dyn LogSink,
    area: Area,
    dir: &Path,
    names: &[String],
    one_at_a_time: bool,
    build_batch: F,
) -> Result<bool>
where
    F: Fn(&[String]) -> CommandBatch,
{
    if names.is_empty() {
        return Ok(false);
    }

    let group_size = if one_at_a_time { 1 } else { names.len() };
    let mut had_errors = false;
    for group in names.chunks(group_size) {
        let output = runner.run(dir, &build_batch(group));
        had_errors |= report_failures(sink, area, &output)?;
        for name in group {
            sink.write_styled(&format!("Deleted: {name}"), LineStyle::Deleted)?;
        }
    }
    Ok(had_errors)
}

/// Pull-request creation is a configured toggle without an implementation
pub(crate) fn skip_pull_requests(sink: &mut dyn LogSink, area: Area) -> Result<()> {
    log::info!("Pull request creation requested for {area} but not supported");
    sink.write_styled(
        &format!("{area}: Pull request creation is not supported, skipping"),
        LineStyle::Warning,
    )
}
