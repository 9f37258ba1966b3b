//! Compiled per-area pattern rules.
//!
//! Rules are configured as `Area -> [pattern]` and compiled once at startup, so an
//! invalid pattern fails the run before any repository is touched. Looking rules up
//! by area is the only way to obtain them, which keeps one area's patterns from ever
//! being applied to another area's refs.

use crate::core::area::Area;
use crate::core::error::{CleanupError, Result};
use regex::Regex;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<Area, Vec<Regex>>,
}

impl RuleSet {
    /// Compile every pattern, failing on the first one that is not a valid regex
    pub fn compile(patterns: &BTreeMap<Area, Vec<String>>) -> Result<Self> {
        let mut rules = BTreeMap::new();
        for (area, area_patterns) in patterns {
            let compiled = area_patterns
                .iter()
                .map(|pattern| {
                    Regex::new(pattern)
                        .map_err(|e| CleanupError::invalid_pattern(*area, pattern, e))
                })
                .collect::<Result<Vec<_>>>()?;
            log::debug!("Compiled {} rule(s) for {area}", compiled.len());
            rules.insert(*area, compiled);
        }
        Ok(Self { rules })
    }

    /// Rules of `area`, empty when none are configured
    pub fn for_area(&self, area: Area) -> &[Regex] {
        self.rules.get(&area).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }
}
