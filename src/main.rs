mod cli;
mod config;
mod error;
mod logging;
mod settings;
mod setup;
mod statusline;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());
    let non_interactive = cli.non_interactive;

    match cli.command {
        Command::Install(mut args) => {
            args.non_interactive = non_interactive;
            cli::install::run(args)
        }
        Command::Status(args) => cli::status::run(args),
        Command::Uninstall(args) => cli::uninstall::run(args),
        Command::Print(args) => cli::print::run(args),
    }
}
