//! Shared CLI helpers.
//!
//! Flags and resolution used by more than one subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::cli::output;
use crate::config::{self, ConfigMessage, InstallerConfig};
use crate::error::SetupError;
use crate::statusline::CommandSource;

/// Which command to register. Falls back to the config file, then the default.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Register this command name (resolved on PATH by the host)
    #[arg(long, value_name = "NAME", conflicts_with = "script")]
    pub command: Option<String>,

    /// Register an absolute path to a status-line script instead of a command name
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Settings file to modify (default: ~/.claude/settings.json)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

/// Resolve the command source: flags, then config, then the packaged default.
pub fn resolve_source(args: &SourceArgs, config: &InstallerConfig, cwd: &Path) -> CommandSource {
    if let Some(script) = &args.script {
        return CommandSource::script(script, cwd);
    }
    if let Some(command) = args.command.as_deref().filter(|c| !c.trim().is_empty()) {
        return CommandSource::Named(command.trim().to_string());
    }
    if let Some(script) = &config.script {
        return CommandSource::script(script, cwd);
    }
    if let Some(command) = config.command.as_deref().filter(|c| !c.trim().is_empty()) {
        return CommandSource::Named(command.trim().to_string());
    }
    CommandSource::default()
}

/// Load the config file, printing its warnings to stderr.
pub fn load_config() -> Result<InstallerConfig> {
    let (config, messages) = config::load();
    let mut stderr = std::io::stderr();
    for msg in &messages {
        let ConfigMessage::Warning(w) = msg;
        tracing::debug!("config: {}", w);
        output::warning(&mut stderr, &format!("config warning: {}", w))
            .context("failed to write to stderr")?;
    }
    Ok(config)
}

/// Resolve the settings path from `--settings` or the home directory.
pub fn settings_path(args: &SourceArgs, home: &Path, cwd: &Path) -> PathBuf {
    match &args.settings {
        Some(p) if p.is_absolute() => p.clone(),
        Some(p) => cwd.join(p),
        None => crate::settings::default_settings_path(home),
    }
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine current directory")
}

pub fn home_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir().ok_or(SetupError::NoHomeDir)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn test_default_source() {
        let source = resolve_source(&SourceArgs::default(), &InstallerConfig::default(), &cwd());
        assert_eq!(source, CommandSource::Named("cc-minimal-statusline".into()));
    }

    #[test]
    fn test_flag_beats_config() {
        let args = SourceArgs {
            command: Some("from-flag".into()),
            ..Default::default()
        };
        let config = InstallerConfig {
            script: Some(PathBuf::from("/cfg/sl.sh")),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&args, &config, &cwd()),
            CommandSource::Named("from-flag".into())
        );
    }

    #[test]
    fn test_config_script_beats_config_command() {
        let config = InstallerConfig {
            command: Some("named".into()),
            script: Some(PathBuf::from("bin/sl.sh")),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&SourceArgs::default(), &config, &cwd()),
            CommandSource::Script(PathBuf::from("/work/bin/sl.sh"))
        );
    }

    #[test]
    fn test_blank_command_falls_through() {
        let args = SourceArgs {
            command: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&args, &InstallerConfig::default(), &cwd()),
            CommandSource::default()
        );
    }

    #[test]
    fn test_settings_path_override() {
        let home = Path::new("/home/u");
        let args = SourceArgs {
            settings: Some(PathBuf::from("local/settings.json")),
            ..Default::default()
        };
        assert_eq!(
            settings_path(&args, home, &cwd()),
            PathBuf::from("/work/local/settings.json")
        );
        assert_eq!(
            settings_path(&SourceArgs::default(), home, &cwd()),
            PathBuf::from("/home/u/.claude/settings.json")
        );
    }
}
