use clap::{Parser, Subcommand};
use git_cleanup::commands::{AreaReport, BranchWorkflow, TagWorkflow};
use git_cleanup::core::{
    error::Result, print_error, print_info, print_section_header, print_success, Area,
    CleanupConfig, ConsoleAndFileSink, GitRunner,
};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "git-cleanup")]
#[command(about = "Report and prune stale branches and tags across managed repositories")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (defaults to <config dir>/git-cleanup/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report only, never delete, regardless of configuration
    #[arg(long, global = true)]
    dry_run: bool,

    /// Restrict the run to one configured area (e.g. CORE, gateway-inews)
    #[arg(long, global = true, value_name = "AREA")]
    area: Option<Area>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean up tags, then branches, for every area
    Run,
    /// Clean up remote branches
    Branches,
    /// Clean up tags
    Tags,
    /// Show the effective configuration
    Config {
        /// Write the default configuration if no file exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = execute(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    let (run_branches, run_tags) = match cli.command {
        Commands::Config { init } => return configure(cli.config.as_deref(), init),
        Commands::Run => (true, true),
        Commands::Branches => (true, false),
        Commands::Tags => (false, true),
    };

    let (mut config, source) = CleanupConfig::load(cli.config.as_deref())?;
    log::debug!("Configuration loaded from {source}");
    if cli.dry_run {
        config.options.allow_delete = false;
    }

    let areas = config.selected_areas(cli.area)?;
    let branch_rules = config.branch_rule_set()?;
    let tag_rules = config.tag_rule_set()?;
    if run_branches && branch_rules.is_empty() {
        print_info("No branch rules configured, no branches will be marked for deletion");
    }
    if run_tags && tag_rules.is_empty() {
        print_info("No tag rules configured, no tags will be marked for deletion");
    }

    let mut runner = GitRunner::new();
    let mut sink = ConsoleAndFileSink::new(&config.log_file);
    let mut reports = Vec::new();

    if run_tags {
        let mut workflow = TagWorkflow::new(&mut runner, &mut sink, &tag_rules, config.options);
        reports.extend(workflow.run(&areas)?);
    }
    if run_branches {
        let mut workflow =
            BranchWorkflow::new(&mut runner, &mut sink, &branch_rules, config.options)
                .with_merge_target(config.merge_target.clone());
        reports.extend(workflow.run(&areas)?);
    }

    print_summary(&reports, sink.path());
    Ok(())
}

fn configure(explicit: Option<&Path>, init: bool) -> Result<()> {
    if init {
        let target = match explicit {
            Some(path) => path.to_path_buf(),
            None => CleanupConfig::default_path()?,
        };
        if target.exists() {
            print_info(&format!(
                "Configuration already exists at {}",
                target.display()
            ));
            return Ok(());
        }
        CleanupConfig::default().save_to(&target)?;
        print_success(&format!("Wrote default configuration to {}", target.display()));
        return Ok(());
    }

    let (config, source) = CleanupConfig::load(explicit)?;
    print_section_header(&format!("Configuration ({source})"));
    println!("{}", config.to_json()?);
    Ok(())
}

fn print_summary(reports: &[AreaReport], log_path: &Path) {
    let deleted: usize = reports.iter().map(|r| r.deleted.len()).sum();
    let failed: Vec<String> = reports
        .iter()
        .filter(|r| r.had_errors)
        .map(|r| r.area.to_string())
        .collect();

    if !failed.is_empty() {
        log::warn!("git reported errors for: {}", failed.join(", "));
    }

    print_success(&format!(
        "Cleanup finished: {} area run(s), {} deletion(s) issued, log at {}",
        reports.len(),
        deleted,
        log_path.display()
    ));
}
