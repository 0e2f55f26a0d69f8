use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::cli::output;
use crate::cli::util::{self, SourceArgs};
use crate::settings::{self, RemoveOutcome};
use crate::setup;
use crate::statusline::StatusLineEntry;

#[derive(ClapArgs)]
pub struct Args {
    /// Remove statusLine even if it registers a different command
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: Args) -> Result<()> {
    let config = util::load_config()?;
    let cwd = util::current_dir()?;
    let home = util::home_dir()?;

    let entry = StatusLineEntry::new(&util::resolve_source(&args.source, &config, &cwd));
    let path = util::settings_path(&args.source, &home, &cwd);
    let shown = setup::display_path(&home, &path);

    let expected = (!args.force).then_some(entry.command.as_str());
    let outcome = settings::remove_status_line(&path, expected)
        .with_context(|| format!("failed to update {}", path.display()))?;

    let mut out = std::io::stdout();
    match outcome {
        RemoveOutcome::Removed(_) => {
            output::success(&mut out, &format!("Removed statusLine from {}", shown))?;
        }
        RemoveOutcome::Foreign(current) => {
            let command = current
                .get("command")
                .and_then(|v| v.as_str())
                .unwrap_or("<none>");
            output::warning(
                &mut out,
                &format!(
                    "statusLine in {} runs `{}`, not `{}`; left unchanged",
                    shown, command, entry.command
                ),
            )?;
            output::info(&mut out, "Re-run with --force to remove it anyway.")?;
        }
        RemoveOutcome::NotPresent => {
            output::info(&mut out, &format!("No statusLine configured in {}", shown))?;
        }
    }
    output::info(&mut out, "All other settings were left untouched.")?;

    Ok(())
}
