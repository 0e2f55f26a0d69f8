pub mod install;
pub mod output;
pub mod print;
pub mod status;
pub mod uninstall;
pub mod util;

use clap::{Parser, Subcommand};

/// Register the minimal status line in Claude Code's settings.json
#[derive(Parser)]
#[command(name = "cc-statusline-setup", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Never prompt; treat the session as non-interactive
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Diagnostics on stderr: off, error, warn, info, debug
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add the statusLine entry to ~/.claude/settings.json
    Install(install::Args),

    /// Show whether the statusLine entry is configured
    Status(status::Args),

    /// Remove the statusLine entry, keeping all other settings
    Uninstall(uninstall::Args),

    /// Print the JSON fragment to add by hand
    Print(print::Args),
}
