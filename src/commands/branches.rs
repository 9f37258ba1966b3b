use crate::commands::workflow::{
    collect_names, delete_in_groups, enter_stage, into_ref_lines, report_failures,
    skip_pull_requests, write_count, write_percentage, write_ref_list, write_separator,
    AreaReport, Stage, REMOTE,
};
use crate::core::{
    area::Area,
    classifier::{match_rules, partition_unmerged},
    config::WorkflowOptions,
    error::Result,
    refs::{RefLine, REF_FORMAT, REMOTE_BRANCH_PREFIX},
    rules::RuleSet,
    runner::{CommandBatch, CommandRunner},
    sink::{LineStyle, LogSink},
};
use regex::Regex;
use std::path::{Path, PathBuf};

const WORKFLOW: &str = "Branch";

/// Every set derived for one area in one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchPartition {
    pub all: Vec<RefLine>,
    pub delete: Vec<RefLine>,
    pub unmerged: Vec<RefLine>,
    pub unsafe_delete: Vec<RefLine>,
    pub safe_delete: Vec<RefLine>,
}

impl BranchPartition {
    pub fn classify(all: Vec<RefLine>, unmerged: Vec<RefLine>, rules: &[Regex]) -> Self {
        let delete = match_rules(&all, rules);
        let (unsafe_delete, safe_delete) = partition_unmerged(&delete, &unmerged);
        Self {
            all,
            delete,
            unmerged,
            unsafe_delete,
            safe_delete,
        }
    }
}

/// Sync, prune and compact the repository, then list remote branches by commit date
pub fn fetch_branches_batch() -> CommandBatch {
    CommandBatch::new()
        .git(["fetch", REMOTE])
        .git(["remote", "prune", REMOTE])
        .git(["gc", "--auto"])
        .git([
            "for-each-ref",
            "--sort=committerdate",
            REF_FORMAT,
            "refs/remotes/origin",
        ])
}

/// Ref the unmerged check compares against when no merge target is configured.
/// Tracks the remote's default branch regardless of what the checkout has open.
pub const DEFAULT_MERGE_TARGET: &str = "origin/HEAD";

/// Remote branches not merged into `merge_target`, or the remote default branch when `None`
pub fn unmerged_branches_batch(merge_target: Option<&str>) -> CommandBatch {
    CommandBatch::new().git([
        "branch",
        "-r",
        "--no-merged",
        merge_target.unwrap_or(DEFAULT_MERGE_TARGET),
    ])
}

pub fn delete_branches_batch(names: &[String]) -> CommandBatch {
    let mut args = vec!["push".to_string(), REMOTE.to_string(), "--delete".to_string()];
    args.extend(names.iter().cloned());
    CommandBatch::new().git(args)
}

/// Fetch, classify, report and optionally delete stale remote branches per area
pub struct BranchWorkflow<'a> {
    runner: &'a mut dyn CommandRunner,
    sink: &'a mut dyn LogSink,
    rules: &'a RuleSet,
    options: WorkflowOptions,
    merge_target: Option<String>,
}

impl<'a> BranchWorkflow<'a> {
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        sink: &'a mut dyn LogSink,
        rules: &'a RuleSet,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            runner,
            sink,
            rules,
            options,
            merge_target: None,
        }
    }

    pub fn with_merge_target(mut self, merge_target: Option<String>) -> Self {
        self.merge_target = merge_target;
        self
    }

    /// Process every area in order. Only a failing log sink aborts the loop.
    pub fn run(&mut self, areas: &[(Area, PathBuf)]) -> Result<Vec<AreaReport>> {
        areas
            .iter()
            .map(|(area, path)| self.process_area(*area, path))
            .collect()
    }

    pub fn process_area(&mut self, area: Area, dir: &Path) -> Result<AreaReport> {
        let mut report = AreaReport::new(area);
        self.sink.write_styled(
            &format!("Running Branch commands for: {area}"),
            LineStyle::Header,
        )?;

        enter_stage(WORKFLOW, area, Stage::Fetching);
        let fetched = self.runner.run(dir, &fetch_branches_batch());
        report.had_errors |= report_failures(self.sink, area, &fetched)?;
        let all = into_ref_lines(fetched);

        enter_stage(WORKFLOW, area, Stage::Classifying);
        let unmerged_output = self
            .runner
            .run(dir, &unmerged_branches_batch(self.merge_target.as_deref()));
        report.had_errors |= report_failures(self.sink, area, &unmerged_output)?;
        let partition =
            BranchPartition::classify(all, into_ref_lines(unmerged_output), self.rules.for_area(area));

        report.total = partition.all.len();
        report.marked = partition.delete.len();
        report.unmerged = partition.unmerged.len();
        report.unsafe_count = partition.unsafe_delete.len();
        report.safe = partition.safe_delete.len();

        enter_stage(WORKFLOW, area, Stage::Reporting);
        self.write_report(area, &partition)?;

        if self.options.allow_delete {
            enter_stage(WORKFLOW, area, Stage::Deleting);
            let names = collect_names(self.sink, area, &partition.safe_delete, REMOTE_BRANCH_PREFIX)?;
            report.had_errors |= delete_in_groups(
                self.runner,
                self.sink,
                area,
                dir,
                &names,
                self.options.one_at_a_time,
                delete_branches_batch,
            )?;
            report.deleted = names;
        } else {
            log::debug!("Deletion disabled, {} branch(es) left in {area}", report.safe);
        }

        if self.options.create_pull_requests {
            skip_pull_requests(self.sink, area)?;
        }

        write_separator(self.sink)?;
        Ok(report)
    }

    fn write_report(&mut self, area: Area, partition: &BranchPartition) -> Result<()> {
        let total = partition.all.len();
        let sink = &mut *self.sink;

        write_count(sink, &format!("Total {area} Branches Count"), total)?;
        write_count(
            sink,
            &format!("Total {area} Branches Count to Delete"),
            partition.delete.len(),
        )?;
        write_count(
            sink,
            &format!("Total {area} Branches with Unmerged changes Count"),
            partition.unmerged.len(),
        )?;
        write_count(
            sink,
            &format!("Total {area} Branches to be deleted with unmerged changes Count"),
            partition.unsafe_delete.len(),
        )?;
        write_count(
            sink,
            &format!("Total {area} Branches to be deleted with no unmerged changes Count"),
            partition.safe_delete.len(),
        )?;

        write_percentage(
            sink,
            &format!("Percentage {area} Branches to be Deleted"),
            partition.delete.len(),
            total,
        )?;
        write_percentage(
            sink,
            &format!("Percentage {area} Branches to be deleted with unmerged changes"),
            partition.unsafe_delete.len(),
            total,
        )?;
        write_percentage(
            sink,
            &format!("Percentage {area} Branches to be deleted with no unmerged changes"),
            partition.safe_delete.len(),
            total,
        )?;

        if self.options.list_all {
            write_ref_list(sink, area, &format!("All branches for {area}."), &partition.all)?;
            write_ref_list(
                sink,
                area,
                &format!("All branches for {area}, that is marked for deletion."),
                &partition.delete,
            )?;
            write_ref_list(
                sink,
                area,
                &format!("All branches for {area}, that has unmerged changes."),
                &partition.unmerged,
            )?;
            write_ref_list(
                sink,
                area,
                &format!("All branches for {area}, that is marked for deletion but has unmerged changes."),
                &partition.unsafe_delete,
            )?;
        }

        write_ref_list(
            sink,
            area,
            &format!("All branches for {area}, that can be safely deleted."),
            &partition.safe_delete,
        )
    }
}
