use crate::commands::workflow::{
    collect_names, delete_in_groups, enter_stage, into_ref_lines, report_failures,
    skip_pull_requests, write_count, write_percentage, write_ref_list, write_separator,
    AreaReport, Stage, REMOTE,
};
use crate::core::{
    area::Area,
    classifier::match_rules,
    config::WorkflowOptions,
    error::Result,
    refs::{RefLine, REF_FORMAT, TAG_PREFIX},
    rules::RuleSet,
    runner::{CommandBatch, CommandRunner},
    sink::{LineStyle, LogSink},
};
use std::path::{Path, PathBuf};

const WORKFLOW: &str = "Tag";

/// Tags have no unmerged tier: every marked tag is deletable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPartition {
    pub all: Vec<RefLine>,
    pub delete: Vec<RefLine>,
}

/// Sync tags, prune the ones gone from the remote, compact, then list by commit date
pub fn fetch_tags_batch() -> CommandBatch {
    CommandBatch::new()
        .git(["fetch", REMOTE, "--tags"])
        .git(["fetch", REMOTE, "--prune", "--prune-tags"])
        .git(["gc", "--auto"])
        .git(["for-each-ref", "--sort=committerdate", REF_FORMAT, "refs/tags"])
}

/// Push a delete refspec per tag, then optionally drop the local tags too
pub fn delete_tags_batch(names: &[String], delete_local: bool) -> CommandBatch {
    let mut push = vec!["push".to_string(), REMOTE.to_string()];
    push.extend(names.iter().map(|name| format!(":{TAG_PREFIX}{name}")));
    let batch = CommandBatch::new().git(push);

    if delete_local {
        let mut local = vec!["tag".to_string(), "-d".to_string()];
        local.extend(names.iter().cloned());
        batch.git(local)
    } else {
        batch
    }
}

/// Fetch, classify, report and optionally delete stale tags per area
pub struct TagWorkflow<'a> {
    runner: &'a mut dyn CommandRunner,
    sink: &'a mut dyn LogSink,
    rules: &'a RuleSet,
    options: WorkflowOptions,
}

impl<'a> TagWorkflow<'a> {
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
        }
    }

    pub fn run(&mut self, areas: &[(Area, PathBuf)]) -> Result<Vec<AreaReport>> {
        areas
            .iter()
            .map(|(area, path)| self.process_area(*area, path))
            .collect()
    }

    pub fn process_area(&mut self, area: Area, dir: &Path) -> Result<AreaReport> {
        let mut report = AreaReport::new(area);
        self.sink.write_styled(
            &format!("Running Tags commands for: {area}"),
            LineStyle::Header,
        )?;

        enter_stage(WORKFLOW, area, Stage::Fetching);
        let fetched = self.runner.run(dir, &fetch_tags_batch());
        report.had_errors |= report_failures(self.sink, area, &fetched)?;
        let all = into_ref_lines(fetched);

        enter_stage(WORKFLOW, area, Stage::Classifying);
        let delete = match_rules(&all, self.rules.for_area(area));
        let partition = TagPartition { all, delete };

        report.total = partition.all.len();
        report.marked = partition.delete.len();
        report.safe = partition.delete.len();

        enter_stage(WORKFLOW, area, Stage::Reporting);
        self.write_report(area, &partition)?;

        if self.options.allow_delete {
            enter_stage(WORKFLOW, area, Stage::Deleting);
            let names = collect_names(self.sink, area, &partition.delete, TAG_PREFIX)?;
            let delete_local = self.options.delete_local_tags;
            report.had_errors |= delete_in_groups(
                self.runner,
                self.sink,
                area,
                dir,
                &names,
                self.options.one_at_a_time,
                |group| delete_tags_batch(group, delete_local),
            )?;
            report.deleted = names;
        } else {
            log::debug!("Deletion disabled, {} tag(s) left in {area}", report.marked);
        }

        if self.options.create_pull_requests {
            skip_pull_requests(self.sink, area)?;
        }

        write_separator(self.sink)?;
        Ok(report)
    }

    fn write_report(&mut self, area: Area, partition: &TagPartition) -> Result<()> {
        let total = partition.all.len();
        let sink = &mut *self.sink;

        write_count(sink, &format!("Total {area} Tags Count"), total)?;
        write_count(
            sink,
            &format!("Total {area} Tags Count to Delete"),
            partition.delete.len(),
        )?;
        write_percentage(
            sink,
            &format!("Percentage {area} Tags to be Deleted"),
            partition.delete.len(),
            total,
        )?;

        if self.options.list_all {
            write_ref_list(sink, area, &format!("All tags for {area}."), &partition.all)?;
        }

        write_ref_list(
            sink,
            area,
            &format!("All tags for {area}, that is marked for deletion."),
            &partition.delete,
        )
    }
}
