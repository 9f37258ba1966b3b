//! Throwaway remote/clone repository pairs and config files for integration tests

#![allow(dead_code)]

use anyhow::{bail, Context};
use git_cleanup::core::{Area, CleanupConfig, WorkflowOptions};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A bare remote and a working clone of it. The TempDir must be kept alive for the
/// duration of the test to prevent cleanup.
pub struct TestRemote {
    pub temp_dir: TempDir,
    pub remote: PathBuf,
    pub work: PathBuf,
}

impl TestRemote {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn log_file(&self) -> PathBuf {
        self.root().join("Output.txt")
    }
}

/// Run git in `dir`, failing the test on a non-zero exit. Returns stdout.
pub fn git(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to spawn git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn configure_identity(dir: &Path) -> anyhow::Result<()> {
    git(dir, &["config", "user.name", "Test User"])?;
    git(dir, &["config", "user.email", "test@example.com"])?;
    git(dir, &["config", "commit.gpgsign", "false"])?;
    git(dir, &["config", "tag.gpgsign", "false"])?;
    Ok(())
}

/// Seed a repository with one commit on `main`, publish it as a bare remote and
/// clone that remote as the working area.
pub fn setup_remote_with_clone() -> anyhow::Result<TestRemote> {
    let temp_dir = TempDir::new()?;
    let seed = temp_dir.path().join("seed");
    let remote = temp_dir.path().join("remote.git");
    let work = temp_dir.path().join("work");
    fs::create_dir_all(&seed)?;

    git(&seed, &["init"])?;
    git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    configure_identity(&seed)?;
    fs::write(seed.join("README.md"), "seed\n")?;
    git(&seed, &["add", "README.md"])?;
    git(&seed, &["commit", "-m", "Initial commit"])?;

    let root = temp_dir.path();
    git(root, &["clone", "--bare", "seed", "remote.git"])?;
    git(root, &["clone", "remote.git", "work"])?;
    configure_identity(&work)?;

    Ok(TestRemote {
        temp_dir,
        remote,
        work,
    })
}

/// Create `name` from main, optionally with a commit main does not have, and push it
pub fn push_branch(work: &Path, name: &str, unmerged_commit: bool) -> anyhow::Result<()> {
    git(work, &["checkout", "-b", name, "main"])?;
    if unmerged_commit {
        let file = format!("{}.txt", name.replace('/', "_"));
        fs::write(work.join(&file), format!("work on {name}\n"))?;
        git(work, &["add", &file])?;
        git(work, &["commit", "-m", &format!("Work on {name}")])?;
    }
    git(work, &["push", "origin", name])?;
    git(work, &["checkout", "main"])?;
    Ok(())
}

pub fn push_tag(work: &Path, name: &str) -> anyhow::Result<()> {
    git(work, &["tag", name])?;
    git(work, &["push", "origin", name])?;
    Ok(())
}

fn list(dir: &Path, namespace: &str) -> anyhow::Result<Vec<String>> {
    Ok(git(dir, &["for-each-ref", "--format=%(refname:short)", namespace])?
        .lines()
        .map(str::to_string)
        .collect())
}

pub fn remote_branches(remote: &Path) -> anyhow::Result<Vec<String>> {
    list(remote, "refs/heads")
}

pub fn remote_tags(remote: &Path) -> anyhow::Result<Vec<String>> {
    list(remote, "refs/tags")
}

pub fn local_tags(work: &Path) -> anyhow::Result<Vec<String>> {
    list(work, "refs/tags")
}

/// Write a config for the single area CORE pointing at `repo.work`
pub fn write_config(
    repo: &TestRemote,
    branch_patterns: &[&str],
    tag_patterns: &[&str],
    options: WorkflowOptions,
) -> anyhow::Result<PathBuf> {
    let to_rules = |patterns: &[&str]| -> BTreeMap<Area, Vec<String>> {
        BTreeMap::from([(Area::Core, patterns.iter().map(|p| p.to_string()).collect())])
    };

    let config = CleanupConfig {
        areas: BTreeMap::from([(Area::Core, repo.work.clone())]),
        options,
        branch_rules: to_rules(branch_patterns),
        tag_rules: to_rules(tag_patterns),
        merge_target: None,
        log_file: repo.log_file(),
    };

    let path = repo.root().join("config.json");
    config.save_to(&path)?;
    Ok(path)
}
