//! Install policies and the environment they run against.
//!
//! `auto` merges silently, `manual` only prints what to add, and `prompt`
//! asks first on an interactive terminal (printing instructions otherwise).

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::output;
use crate::error::{Result, SetupError};
use crate::settings::{self, MergeReport};
use crate::statusline::StatusLineEntry;

/// How `install` decides whether to touch the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Merge without asking.
    #[default]
    Auto,
    /// Print the JSON fragment; never write.
    Manual,
    /// Ask on a terminal; print instructions when there is none.
    Prompt,
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Policy::Auto => "auto",
            Policy::Manual => "manual",
            Policy::Prompt => "prompt",
        };
        f.write_str(s)
    }
}

/// Process-wide state handed to the installer explicitly.
pub struct Env<'a> {
    pub home: PathBuf,
    pub interactive: bool,
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
}

impl<'a> Env<'a> {
    /// Wire up the real home directory and standard streams.
    pub fn system(
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
        non_interactive: bool,
    ) -> Result<Self> {
        use std::io::IsTerminal;

        let home = dirs::home_dir().ok_or(SetupError::NoHomeDir)?;
        let interactive = !non_interactive && std::io::stdin().is_terminal();
        Ok(Self {
            home,
            interactive,
            input,
            out,
        })
    }
}

/// What `install` ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// The settings file now carries the entry.
    Merged(MergeReport),
    /// The user answered no at the prompt.
    Declined,
    /// No write was attempted: manual policy, or no terminal to ask on.
    Manual,
}

/// Apply `policy` for `entry` against the settings file at `path`.
pub fn install(
    env: &mut Env<'_>,
    policy: Policy,
    path: &Path,
    entry: &StatusLineEntry,
) -> Result<InstallOutcome> {
    tracing::debug!(%policy, interactive = env.interactive, path = %path.display(), "install");

    match policy {
        Policy::Auto => {}
        Policy::Manual => {
            print_manual_instructions(env.out, path, entry)?;
            return Ok(InstallOutcome::Manual);
        }
        Policy::Prompt => {
            if !env.interactive {
                output::info(env.out, "Not running in a terminal; leaving settings untouched.")?;
                print_manual_instructions(env.out, path, entry)?;
                return Ok(InstallOutcome::Manual);
            }
            if !confirm(env, path)? {
                print_manual_instructions(env.out, path, entry)?;
                return Ok(InstallOutcome::Declined);
            }
        }
    }

    let report = settings::merge_status_line(path, entry)?;
    if let Some(backup) = &report.backup {
        output::warning(
            env.out,
            &format!(
                "Could not parse existing {}; original saved to {}",
                display_path(&env.home, path),
                display_path(&env.home, backup)
            ),
        )?;
    }
    Ok(InstallOutcome::Merged(report))
}

/// Ask a default-yes question and read one line.
///
/// Empty, `y` and `yes` (any case) accept. End of input declines.
fn confirm(env: &mut Env<'_>, path: &Path) -> Result<bool> {
    write!(
        env.out,
        "Configure the status line in {}? [Y/n] ",
        display_path(&env.home, path)
    )?;
    env.out.flush()?;

    let mut line = String::new();
    let read = env.input.read_line(&mut line).map_err(SetupError::Prompt)?;
    if read == 0 {
        writeln!(env.out)?;
        return Ok(false);
    }
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer.is_empty() || answer == "y" || answer == "yes"
}

/// Print the fragment a user would paste into the settings file.
pub fn print_manual_instructions(
    out: &mut dyn Write,
    path: &Path,
    entry: &StatusLineEntry,
) -> Result<()> {
    writeln!(out)?;
    output::header(out, &format!("MANUAL STEP: add this to {}:", path.display()))?;
    writeln!(out)?;
    for line in entry.fragment_pretty()?.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Render `path` relative to `home` as `~/...` when it lives under it.
pub fn display_path(home: &Path, path: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(relative) => format!("~/{}", relative.display()),
        Err(_) => path.display().to_string(),
    }
}
