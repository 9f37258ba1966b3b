//! Raw ref lines as produced by `git for-each-ref` and `git branch -r`.
//!
//! A [`RefLine`] is treated as an opaque string for matching. The only structure the
//! tool relies on is the fixed ref-namespace prefix and the field delimiter, which are
//! used to recover the bare branch or tag name for deletion commands.

use crate::core::error::{CleanupError, Result};
use std::fmt;

/// Namespace prefix of remote-tracking branches (20 characters)
pub const REMOTE_BRANCH_PREFIX: &str = "refs/remotes/origin/";

/// Namespace prefix of tags (10 characters)
pub const TAG_PREFIX: &str = "refs/tags/";

/// Separator between fields in the `for-each-ref` format string
pub const FIELD_DELIMITER: char = '|';

/// Number of fields in a line produced with [`REF_FORMAT`]
pub const REF_FIELD_COUNT: usize = 4;

/// `--format` argument matching the `refname|creatordate|committerdate|creator` layout
pub const REF_FORMAT: &str = "--format=%(refname)|%(creatordate)|%(committerdate)|%(creator)";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefLine(String);

impl RefLine {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the bare ref name by stripping `prefix` and cutting at the first delimiter.
    ///
    /// Both `|` and whitespace count as delimiters so that pipe-formatted and
    /// space-formatted query output yield the same name. A pipe-formatted line with
    /// more than [`REF_FIELD_COUNT`] fields is rejected: git allows `|` inside ref
    /// names, and cutting such a name would target a different ref.
    pub fn bare_name(&self, prefix: &'static str) -> Result<&str> {
        let rest = self
            .0
            .strip_prefix(prefix)
            .ok_or_else(|| CleanupError::malformed_ref_line(&self.0, prefix))?;

        if rest.split(FIELD_DELIMITER).count() > REF_FIELD_COUNT {
            return Err(CleanupError::malformed_ref_line(&self.0, prefix));
        }

        let name = rest
            .split(|c: char| c == FIELD_DELIMITER || c.is_whitespace())
            .next()
            .unwrap_or_default();

        if name.is_empty() {
            return Err(CleanupError::malformed_ref_line(&self.0, prefix));
        }
        Ok(name)
    }
}

impl fmt::Display for RefLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RefLine {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl From<String> for RefLine {
    fn from(line: String) -> Self {
        Self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_widths() {
        assert_eq!(REMOTE_BRANCH_PREFIX.len(), 20);
        assert_eq!(TAG_PREFIX.len(), 10);
    }

    #[test]
    fn test_branch_name_from_pipe_line() {
        let line = RefLine::new("refs/remotes/origin/feat/login-fix|2021-01-01|2021-01-02|Jane");
        assert_eq!(line.bare_name(REMOTE_BRANCH_PREFIX).unwrap(), "feat/login-fix");
    }

    #[test]
    fn test_branch_name_from_space_line() {
        let line = RefLine::new("refs/remotes/origin/fix/crash Mon Jan 4 10:00:00 2021 +0100");
        assert_eq!(line.bare_name(REMOTE_BRANCH_PREFIX).unwrap(), "fix/crash");
    }

    #[test]
    fn test_tag_name() {
        let line = RefLine::new("refs/tags/v1.2.3|2020-05-01||");
        assert_eq!(line.bare_name(TAG_PREFIX).unwrap(), "v1.2.3");
    }

    #[test]
    fn test_line_without_delimiter_is_whole_name() {
        let line = RefLine::new("refs/tags/release-7");
        assert_eq!(line.bare_name(TAG_PREFIX).unwrap(), "release-7");
    }

    #[test]
    fn test_missing_prefix_is_malformed() {
        let line = RefLine::new("  origin/feat/x");
        assert!(matches!(
            line.bare_name(REMOTE_BRANCH_PREFIX),
            Err(CleanupError::MalformedRefLine { .. })
        ));
    }

    #[test]
    fn test_pipe_inside_name_is_rejected() {
        let line = RefLine::new("refs/tags/v1|old|2020-05-01|2020-05-01|Jane");
        assert!(matches!(
            line.bare_name(TAG_PREFIX),
            Err(CleanupError::MalformedRefLine { .. })
        ));
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let line = RefLine::new("refs/tags/|2020-05-01");
        assert!(line.bare_name(TAG_PREFIX).is_err());
    }
}
