use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

mod args;
mod cmd;
mod io;
mod logging;
mod output;

fn main() -> ExitCode {
    let cli = match args::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(cmd::USAGE_ERROR),
            };
        }
    };
    output::init(cli.json);
    if let Err(e) = logging::init(cli.json, cli.verbose) {
        eprintln!("error: {e:#}");
        return ExitCode::from(cmd::USAGE_ERROR);
    }

    match cmd::dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(cmd::USAGE_ERROR)
        }
    }
}
