//! Git Cleanup - classify and prune stale branches and tags across a fixed set of
//! repositories.
//!
//! For every configured area the tool lists remote branches and tags, marks the ones
//! matching the area's patterns, separates marked branches that still carry unmerged
//! changes from those that are safe to delete, reports counts and percentages, and,
//! when allowed, deletes the safe ones.
//!
//! # Public API
//! The [`core`] module provides configuration, classification and the runner / log
//! seams; [`commands`] provides the branch and tag workflows built on top of them.

pub mod commands;
pub mod core;

pub use commands::{AreaReport, BranchPartition, BranchWorkflow, TagPartition, TagWorkflow};
pub use core::{
    match_rules, partition_unmerged, percentage, Area, CleanupConfig, CleanupError,
    CommandBatch, CommandOutput, CommandRunner, ConsoleAndFileSink, GitRunner, LineStyle,
    LogSink, MemorySink, RefLine, Result, RuleSet, WorkflowOptions,
};
