use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{assertions, repository::*};
use git_cleanup::core::WorkflowOptions;

#[cfg(test)]
mod tags_command_tests {
    use super::*;

    const RC_TAGS: &str = r"-rc\d+\|";

    fn tagged_remote() -> anyhow::Result<TestRemote> {
        let repo = setup_remote_with_clone()?;
        push_tag(&repo.work, "v1.0")?;
        push_tag(&repo.work, "v1.1-rc1")?;
        push_tag(&repo.work, "v1.1-rc2")?;
        Ok(repo)
    }

    #[test]
    fn test_tags_dry_run_reports_counts() -> anyhow::Result<()> {
        let repo = tagged_remote()?;
        let config = write_config(&repo, &[], &[RC_TAGS], WorkflowOptions::default())?;

        let mut cmd = Command::cargo_bin("git-cleanup")?;
        cmd.arg("--config")
            .arg(&config)
            .arg("tags")
            .current_dir(repo.root())
            .assert()
            .success()
            .stdout(predicate::str::contains("Running Tags commands for: CORE"))
            .stdout(assertions::has_count("Total CORE Tags Count", 3))
            .stdout(assertions::has_count("Total CORE Tags Count to Delete", 2))
            .stdout(predicate::str::contains(
                "Percentage CORE Tags to be Deleted: 66.667%",
            ))
            .stdout(predicate::str::contains("CORE: refs/tags/v1.1-rc1|"));

        assert_eq!(remote_tags(&repo.remote)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_tags_batched_delete_remote_and_local() -> anyhow::Result<()> {
        let repo = tagged_remote()?;
        let options = WorkflowOptions {
            allow_delete: true,
            one_at_a_time: false,
            delete_local_tags: true,
            ..WorkflowOptions::default()
        };
        let config = write_config(&repo, &[], &[RC_TAGS], options)?;

        let mut cmd = Command::cargo_bin("git-cleanup")?;
        cmd.arg("--config")
            .arg(&config)
            .arg("tags")
            .current_dir(repo.root())
            .assert()
            .success()
            .stdout(assertions::deleted("v1.1-rc1"))
            .stdout(assertions::deleted("v1.1-rc2"))
            .stdout(assertions::deleted("v1.0").not());

        assert_eq!(remote_tags(&repo.remote)?, vec!["v1.0".to_string()]);
        assert_eq!(local_tags(&repo.work)?, vec!["v1.0".to_string()]);
        Ok(())
    }

    #[test]
    fn test_run_processes_tags_before_branches() -> anyhow::Result<()> {
        let repo = tagged_remote()?;
        let config = write_config(&repo, &[r"/feat/"], &[RC_TAGS], WorkflowOptions::default())?;

        let output = Command::cargo_bin("git-cleanup")?
            .arg("--config")
            .arg(&config)
            .arg("run")
            .current_dir(repo.root())
            .output()?;
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let tags_at = stdout
            .find("Running Tags commands for: CORE")
            .expect("tag workflow ran");
        let branches_at = stdout
            .find("Running Branch commands for: CORE")
            .expect("branch workflow ran");
        assert!(tags_at < branches_at);
        Ok(())
    }
}
