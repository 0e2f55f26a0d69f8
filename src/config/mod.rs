pub mod schema;

use std::path::{Path, PathBuf};

pub use schema::{ConfigMessage, InstallerConfig};

/// Location of the optional defaults file (`~/.config/cc-statusline/config.toml` on Linux).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cc-statusline").join("config.toml"))
}

/// Load defaults from the standard location.
///
/// A missing file yields defaults silently. Unreadable or invalid files yield
/// defaults plus a warning; configuration never blocks an install.
pub fn load() -> (InstallerConfig, Vec<ConfigMessage>) {
    match config_path() {
        Some(path) => load_from(&path),
        None => (InstallerConfig::default(), Vec::new()),
    }
}

/// Load and validate the config file at `path`.
pub fn load_from(path: &Path) -> (InstallerConfig, Vec<ConfigMessage>) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (InstallerConfig::default(), Vec::new())
        }
        Err(e) => {
            return (
                InstallerConfig::default(),
                vec![ConfigMessage::Warning(format!(
                    "could not read {}: {}; using defaults",
                    path.display(),
                    e
                ))],
            )
        }
    };

    match toml::from_str::<InstallerConfig>(&contents) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), ?config, "loaded config");
            let messages = config.validate();
            (config, messages)
        }
        Err(e) => (
            InstallerConfig::default(),
            vec![ConfigMessage::Warning(format!(
                "ignoring {}: {}",
                path.display(),
                e.message()
            ))],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Policy;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let (config, messages) = load_from(&dir.path().join("config.toml"));
        assert_eq!(config, InstallerConfig::default());
        assert!(messages.is_empty());
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "policy = \"manual\"\ncommand = \"my-statusline\"\n").unwrap();

        let (config, messages) = load_from(&path);
        assert_eq!(config.policy, Some(Policy::Manual));
        assert_eq!(config.command.as_deref(), Some("my-statusline"));
        assert_eq!(config.script, None);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_invalid_toml_falls_back_with_warning() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "policy = [unterminated").unwrap();

        let (config, messages) = load_from(&path);
        assert_eq!(config, InstallerConfig::default());
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_unknown_policy_falls_back_with_warning() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "policy = \"sometimes\"").unwrap();

        let (config, messages) = load_from(&path);
        assert_eq!(config.policy, None);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_command_and_script_conflict_warns() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "command = \"a\"\nscript = \"/opt/b.sh\"\n").unwrap();

        let (config, messages) = load_from(&path);
        assert_eq!(config.script, Some(PathBuf::from("/opt/b.sh")));
        assert_eq!(messages.len(), 1);
    }
}
