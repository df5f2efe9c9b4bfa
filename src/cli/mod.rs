use anyhow::Result;

pub mod args;
mod commands;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Localize(cmd)) => commands::localize::localize(cmd),
        Some(Command::Init) => {
            let cwd = std::env::current_dir()?;
            commands::init::init(&cwd)
        }
        None => Ok(ExitStatus::Success),
    }
}
