use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cli::util::{self, SourceArgs};
use crate::statusline::StatusLineEntry;

/// Print the settings fragment. Touches no files.
#[derive(ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: Args) -> Result<()> {
    let config = util::load_config()?;
    let cwd = util::current_dir()?;

    let entry = StatusLineEntry::new(&util::resolve_source(&args.source, &config, &cwd));
    println!("{}", entry.fragment_pretty()?);
    Ok(())
}
