use std::io::Write as _;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;

use crate::cli::output;
use crate::cli::util::{self, SourceArgs};
use crate::setup::{self, Env, InstallOutcome, Policy};
use crate::statusline::{CommandSource, StatusLineEntry};

/// Arguments for the `install` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// auto: write without asking; manual: print instructions only;
    /// prompt: ask on a terminal (default: auto, or `policy` from config.toml)
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Not a CLI argument -- hidden from clap.
    #[arg(skip)]
    pub non_interactive: bool,
}

pub fn run(args: Args) -> Result<()> {
    let config = util::load_config()?;
    let cwd = util::current_dir()?;

    let policy = args.policy.or(config.policy).unwrap_or_default();
    let source = util::resolve_source(&args.source, &config, &cwd);
    if let CommandSource::Script(path) = &source {
        if !path.is_file() {
            bail!("status-line script not found: {}", path.display());
        }
    }
    let entry = StatusLineEntry::new(&source);
    let entry_value = entry.to_value()?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    let mut env = Env::system(&mut input, &mut stdout, args.non_interactive)?;
    let path = util::settings_path(&args.source, &env.home, &cwd);

    let outcome = setup::install(&mut env, policy, &path, &entry)
        .with_context(|| format!("failed to configure {}", path.display()))?;

    let shown = setup::display_path(&env.home, &path);
    let out = &mut *env.out;
    match outcome {
        InstallOutcome::Merged(report) => {
            writeln!(out)?;
            output::header(out, "cc-minimal-statusline installed and configured!")?;
            match report.previous {
                Some(prev) if prev == entry_value => {
                    output::success(out, &format!("Already configured in {}", shown))?;
                }
                Some(_) => {
                    output::success(out, &format!("Replaced existing statusLine in {}", shown))?;
                }
                None => {
                    output::success(out, &format!("Added to {}", shown))?;
                }
            }
            output::info(out, &format!("command: {}", entry.command))?;
            writeln!(out)?;
            output::info(
                out,
                "Tip: Make sure you have a Nerd Font installed for icons to display correctly.",
            )?;
            writeln!(out, "   brew install --cask font-meslo-lg-nerd-font")?;
            writeln!(out)?;
        }
        InstallOutcome::Declined => {
            output::info(out, &format!("Skipped: {} was not modified.", shown))?;
        }
        InstallOutcome::Manual => {
            output::info(
                out,
                "Then restart Claude Code, or re-run with --policy auto to apply it for you.",
            )?;
        }
    }

    Ok(())
}
