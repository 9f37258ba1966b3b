use crate::core::error::CleanupError;
use std::path::PathBuf;

const APP_DIR: &str = "git-cleanup";

pub fn get_config_directory() -> Result<PathBuf, CleanupError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or(CleanupError::ConfigDirectoryNotFound)?
                .join(".config"),
        },
        "macos" => dirs::home_dir()
            .ok_or(CleanupError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(CleanupError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

/// Parent directory of the default repository checkouts (`~/code`)
pub fn get_checkout_root() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join("code")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_directory_ends_with_app_dir() {
        if let Ok(dir) = get_config_directory() {
            assert!(dir.ends_with(APP_DIR));
        }
    }

    #[test]
    fn test_checkout_root() {
        assert!(get_checkout_root().ends_with("code"));
    }
}
