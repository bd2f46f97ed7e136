//! Binary entry point (`cli` feature): dispatches to the REPL or the file
//! runner depending on whether a source path was given.

use std::process::ExitCode;

fn main() -> ExitCode {
    amrit::cli::run_cli()
}
