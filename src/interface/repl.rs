//! Interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use crate::object::{Environment, Value};

const PROMPT: &str = ">>> ";

/// Runs an interactive session over `input`/`output`, keeping one
/// [`Environment`] alive across every line so bindings from earlier input
/// stay visible, the way a human typing at a terminal expects.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut printed = Vec::new();
        match super::run(&line, env.clone(), &mut printed) {
            Ok(value) => {
                if !matches!(value, Value::Null) {
                    writeln!(output, "{}", value.inspect())?;
                }
                for chunk in &printed {
                    write!(output, "{chunk}")?;
                }
            }
            Err(errors) => {
                writeln!(output, "parser errors:")?;
                for err in &errors {
                    writeln!(output, "\t{err}")?;
                }
            }
        }
    }
}
