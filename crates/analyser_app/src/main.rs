use std::process::ExitCode;

use analyser_app::{run_app, Cli};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
