//! Core functionality for the git-cleanup tool.
//!
//! This module provides the building blocks the workflows are assembled from:
//! configuration, rule compilation, ref-line classification, command execution and
//! the result log.

pub mod area;
pub mod classifier;
pub mod config;
pub mod dirs;
pub mod error;
pub mod output;
pub mod refs;
pub mod rules;
pub mod runner;
pub mod sink;

// === Error handling ===
pub use error::{CleanupError, Result};

// === Configuration ===
// Areas, their repository paths, rule patterns and workflow toggles
pub use area::Area;
pub use config::{CleanupConfig, ConfigSource, WorkflowOptions};
pub use rules::RuleSet;

// === Classification ===
// Pure matching / partitioning over raw ref lines
pub use classifier::{match_rules, partition_unmerged, percentage};
pub use refs::{RefLine, REMOTE_BRANCH_PREFIX, TAG_PREFIX};

// === Collaborators ===
// Command execution and the dual console/file result log
pub use runner::{CommandBatch, CommandOutput, CommandRunner, GitCommand, GitRunner};
pub use sink::{ConsoleAndFileSink, LineStyle, LogSink, MemorySink};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};
