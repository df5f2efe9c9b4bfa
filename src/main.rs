use std::process::ExitCode;

use bladeloc::cli::{Arguments, ExitStatus};
use clap::Parser;
use colored::Colorize;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match bladeloc::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::Error.into()
        }
    }
}
