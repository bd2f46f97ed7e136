//! The shared lex-parse-eval pipeline backing every host: the REPL, the
//! file runner, and the WASM bindings all call [`run`] and differ only in
//! where the source text comes from and where the result goes.

pub mod repl;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ParseError;
use crate::interpreter::eval_program;
use crate::lexer::Lexer;
use crate::object::{Environment, Value};
use crate::parser::Parser;

/// Lexes, parses, and evaluates `source` against `env`. `print` output is
/// appended to `stdout` in call order; the program's final value is
/// returned separately so callers can render it last.
pub fn run(source: &str, env: Rc<RefCell<Environment>>, stdout: &mut Vec<String>) -> Result<Value, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(parser.errors().to_vec());
    }
    Ok(eval_program(&program, env, stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_surfaces_parser_errors_without_evaluating() {
        let env = Environment::new();
        let mut stdout = Vec::new();
        let result = run("mana x 5|", env, &mut stdout);
        assert!(result.is_err());
    }

    #[test]
    fn run_evaluates_well_formed_programs() {
        let env = Environment::new();
        let mut stdout = Vec::new();
        let result = run("2 + 2|", env, &mut stdout);
        assert!(matches!(result, Ok(Value::Integer(4))));
    }
}
