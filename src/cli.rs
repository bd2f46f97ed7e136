//! Command-line entry point (`cli` feature): a file runner when given a
//! path, an interactive REPL otherwise.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::{error, info};

use crate::interface::{repl, run};
use crate::object::Environment;

/// Amrit — an interpreted scripting language with Hindi keywords.
#[derive(ClapParser, Debug)]
#[command(name = "amrit", version, about)]
struct Cli {
    /// Path to an Amrit source file. Omit to start the REPL.
    path: Option<PathBuf>,
}

pub fn run_cli() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.path {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_repl() -> ExitCode {
    info!("starting interactive session");
    let stdin = io::stdin();
    let stdout = io::stdout();
    match repl::start(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("repl I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &PathBuf) -> ExitCode {
    if run_file_succeeds(path) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// The body of the file-runner, returning a plain `bool` rather than the
/// opaque [`ExitCode`] so it can be asserted on directly in tests.
fn run_file_succeeds(path: &Path) -> bool {
    if path.extension() != Some(OsStr::new("amr")) {
        error!("refusing to run {}: expected a `.amr` file", path.display());
        return false;
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!("could not read {}: {err}", path.display());
            return false;
        }
    };

    info!("running {}", path.display());
    let env = Environment::new();
    let mut printed = Vec::new();

    match run(&source, env, &mut printed) {
        Ok(value) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for line in &printed {
                let _ = write!(handle, "{line}");
            }
            !value.is_error()
        }
        Err(errors) => {
            for err in errors {
                error!("{err}");
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::Builder;

    #[test]
    fn rejects_a_file_without_the_amr_extension() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "5 + 5|").unwrap();
        assert!(!run_file_succeeds(file.path()));
    }

    #[test]
    fn runs_a_well_formed_amr_file() {
        let mut file = Builder::new().suffix(".amr").tempfile().unwrap();
        writeln!(file, "mana x = 5| x + 1|").unwrap();
        assert!(run_file_succeeds(file.path()));
    }

    #[test]
    fn a_runtime_error_in_an_amr_file_is_not_a_success() {
        let mut file = Builder::new().suffix(".amr").tempfile().unwrap();
        writeln!(file, "5 + satya|").unwrap();
        assert!(!run_file_succeeds(file.path()));
    }
}
