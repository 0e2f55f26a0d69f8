use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args as ClapArgs;
use serde::Serialize;

use crate::cli::output;
use crate::cli::util::{self, SourceArgs};
use crate::settings::{self, Loaded};
use crate::setup;
use crate::statusline::{StatusLineEntry, STATUS_LINE_KEY};

#[derive(ClapArgs)]
pub struct Args {
    /// Output status as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// State of the settings file as seen by `status`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Missing,
    Valid,
    Malformed,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub settings_path: PathBuf,
    pub file: FileState,
    /// `command` of the current `statusLine`, when one is set.
    pub current_command: Option<String>,
    /// The current entry is exactly what `install` would write.
    pub up_to_date: bool,
    pub expected_command: String,
    /// Where the expected command resolves on this machine, if anywhere.
    pub resolved: Option<PathBuf>,
}

/// Inspect `path` against `entry`. Never writes.
pub fn inspect(path: &Path, entry: &StatusLineEntry) -> Result<StatusReport> {
    let (file, current) = match settings::load(path)? {
        Loaded::Missing => (FileState::Missing, None),
        Loaded::Malformed(_) => (FileState::Malformed, None),
        Loaded::Document(doc) => (FileState::Valid, doc.get(STATUS_LINE_KEY).cloned()),
    };

    let current_command = current
        .as_ref()
        .and_then(|v| v.get("command"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let up_to_date = current
        .and_then(|v| serde_json::from_value::<StatusLineEntry>(v).ok())
        .is_some_and(|found| &found == entry);

    Ok(StatusReport {
        settings_path: path.to_path_buf(),
        file,
        current_command,
        up_to_date,
        expected_command: entry.command.clone(),
        resolved: resolve_command(&entry.command),
    })
}

/// Absolute paths must exist; bare names are looked up on PATH.
fn resolve_command(command: &str) -> Option<PathBuf> {
    let path = Path::new(command);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    which::which(command).ok()
}

pub fn run(args: Args) -> Result<()> {
    let config = util::load_config()?;
    let cwd = util::current_dir()?;
    let home = util::home_dir()?;

    let entry = StatusLineEntry::new(&util::resolve_source(&args.source, &config, &cwd));
    let path = util::settings_path(&args.source, &home, &cwd);
    let report = inspect(&path, &entry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    let out: &mut dyn std::io::Write = &mut stdout;
    let shown = setup::display_path(&home, &path);
    output::header(out, "cc-statusline status")?;
    match report.file {
        FileState::Missing => output::warning(out, &format!("{}: not found", shown))?,
        FileState::Malformed => {
            output::warning(out, &format!("{}: not valid JSON", shown))?
        }
        FileState::Valid => output::success(out, &format!("{}: found", shown))?,
    }
    match (&report.current_command, report.up_to_date) {
        (Some(cmd), true) => output::success(out, &format!("statusLine: {}", cmd))?,
        (Some(cmd), false) => output::warning(
            out,
            &format!("statusLine: {} (expected {})", cmd, report.expected_command),
        )?,
        (None, _) => output::warning(out, "statusLine: not configured")?,
    }
    match &report.resolved {
        Some(p) => output::success(
            out,
            &format!("{} -> {}", report.expected_command, p.display()),
        )?,
        None => output::warning(
            out,
            &format!("{}: not found on this machine", report.expected_command),
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statusline::CommandSource;

    fn entry() -> StatusLineEntry {
        StatusLineEntry::new(&CommandSource::default())
    }

    #[test]
    fn test_inspect_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = inspect(&dir.path().join("settings.json"), &entry()).unwrap();
        assert_eq!(report.file, FileState::Missing);
        assert!(!report.up_to_date);
        assert_eq!(report.current_command, None);
    }

    #[test]
    fn test_inspect_up_to_date() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        settings::merge_status_line(&path, &entry()).unwrap();

        let report = inspect(&path, &entry()).unwrap();
        assert_eq!(report.file, FileState::Valid);
        assert!(report.up_to_date);
        assert_eq!(report.current_command.as_deref(), Some("cc-minimal-statusline"));
    }

    #[test]
    fn test_inspect_stale_entry() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"statusLine": {"command": "cc-minimal-statusline"}}"#)
            .unwrap();

        let report = inspect(&path, &entry()).unwrap();
        assert!(!report.up_to_date, "missing type/padding is not up to date");
        assert_eq!(report.current_command.as_deref(), Some("cc-minimal-statusline"));
    }

    #[test]
    fn test_inspect_malformed_does_not_back_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{oops").unwrap();

        let report = inspect(&path, &entry()).unwrap();
        assert_eq!(report.file, FileState::Malformed);
        assert!(!settings::backup_path(&path).exists());
    }

    #[test]
    fn test_resolve_absolute_script() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("sl.sh");
        assert_eq!(resolve_command(script.to_str().unwrap()), None);
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        assert_eq!(resolve_command(script.to_str().unwrap()), Some(script));
    }
}
