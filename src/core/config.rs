//! Startup configuration.
//!
//! The configuration is read once, before any repository is touched, from a JSON file
//! (`--config <PATH>` or `<config dir>/git-cleanup/config.json`). When no file exists
//! the built-in defaults are used. Every field is optional in the file; missing fields
//! fall back to their defaults.

use crate::core::area::Area;
use crate::core::dirs::{get_checkout_root, get_config_directory};
use crate::core::error::{CleanupError, Result};
use crate::core::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_FILE: &str = "Output.txt";

/// Toggles controlling what a run is allowed to do
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WorkflowOptions {
    /// Issue deletion commands for safe candidates; otherwise only report
    pub allow_delete: bool,
    /// One deletion command per ref instead of one batched command per area
    pub one_at_a_time: bool,
    /// Pull-request creation is not supported; when set the step is logged and skipped
    pub create_pull_requests: bool,
    /// Also delete matching tags from the local repository
    pub delete_local_tags: bool,
    /// List every intermediate set, not only the safe-to-delete one
    pub list_all: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            allow_delete: false,
            one_at_a_time: true,
            create_pull_requests: false,
            delete_local_tags: false,
            list_all: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CleanupConfig {
    pub areas: BTreeMap<Area, PathBuf>,
    pub options: WorkflowOptions,
    pub branch_rules: BTreeMap<Area, Vec<String>>,
    pub tag_rules: BTreeMap<Area, Vec<String>>,
    /// Branch the unmerged check compares against; `None` means `origin/HEAD`
    pub merge_target: Option<String>,
    pub log_file: PathBuf,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        let root = get_checkout_root();
        let areas = Area::ALL
            .into_iter()
            .map(|area| (area, root.join(area.default_checkout_name())))
            .collect();

        Self {
            areas,
            options: WorkflowOptions::default(),
            branch_rules: default_branch_rules(),
            tag_rules: BTreeMap::new(),
            merge_target: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn default_branch_rules() -> BTreeMap<Area, Vec<String>> {
    let rules: [(Area, &[&str]); 4] = [
        (
            Area::Core,
            &[
                r"/feat/",
                r"/feature/",
                r"/fix/",
                r"/contribute/",
                r"/dist/",
                r"/test/",
                r"/refactor/",
            ],
        ),
        (Area::GatewayInews, &[r"/feat/", r"/fix/"]),
        (Area::Blueprints, &[r"/feat/", r"/test/", r"/chore/", r"/fix/"]),
        (Area::Tsr, &[]),
    ];

    rules
        .into_iter()
        .map(|(area, patterns)| (area, patterns.iter().map(|p| p.to_string()).collect()))
        .collect()
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl CleanupConfig {
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Load `explicit` if given (it must exist), else the default file if present,
    /// else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        match Self::default_path() {
            Ok(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            Ok(_) => Ok((Self::default(), ConfigSource::Defaults)),
            Err(e) => {
                log::warn!("Using built-in defaults: {e}");
                Ok((Self::default(), ConfigSource::Defaults))
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CleanupError::config_read_failed(path, e))?;
        Self::from_json(&content).map_err(|e| match e {
            CleanupError::Json(source) => CleanupError::config_parse_failed(path, source),
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CleanupError::config_write_failed(parent, e))?;
        }
        std::fs::write(path, self.to_json()?).map_err(|e| CleanupError::config_write_failed(path, e))
    }

    pub fn branch_rule_set(&self) -> Result<RuleSet> {
        RuleSet::compile(&self.branch_rules)
    }

    pub fn tag_rule_set(&self) -> Result<RuleSet> {
        RuleSet::compile(&self.tag_rules)
    }

    /// Configured areas in processing order, optionally restricted to `only`
    pub fn selected_areas(&self, only: Option<Area>) -> Result<Vec<(Area, PathBuf)>> {
        match only {
            Some(area) => {
                let path = self
                    .areas
                    .get(&area)
                    .ok_or(CleanupError::AreaNotConfigured { area })?;
                Ok(vec![(area, path.clone())])
            }
            None => Ok(self
                .areas
                .iter()
                .map(|(area, path)| (*area, path.clone()))
                .collect()),
        }
    }
}
