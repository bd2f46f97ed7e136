//! Browser bindings (`wasm32` target only): two entry points matching the
//! shapes a JS host calls directly.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::interface::run;
use crate::object::{Environment, Value};

thread_local! {
    /// `ReplMode` accumulates bindings across calls, mirroring a terminal
    /// session; `ScriptMode` always starts from a fresh environment.
    static REPL_ENV: RefCell<Rc<RefCell<Environment>>> = RefCell::new(Environment::new());
}

fn render_parse_errors(errors: &[crate::error::ParseError]) -> String {
    let mut out = String::new();
    for err in errors {
        out.push('\t');
        out.push_str(&err.to_string());
        out.push('\n');
    }
    out
}

/// Evaluates `source` from a clean environment. Only the buffered `print`
/// output is returned — the program's own result value is discarded,
/// since a script run from a file has no REPL prompt to print it at.
#[wasm_bindgen(js_name = ScriptMode)]
pub fn script_mode(source: String) -> String {
    let mut printed = Vec::new();
    match run(&source, Environment::new(), &mut printed) {
        Ok(_value) => printed.concat(),
        Err(errors) => render_parse_errors(&errors),
    }
}

/// Evaluates one line against the environment accumulated by prior
/// `ReplMode` calls in this page session. Unlike `ScriptMode`, the
/// result value is rendered first (unless it's Null), followed by any
/// buffered `print` output.
#[wasm_bindgen(js_name = ReplMode)]
pub fn repl_mode(line: String) -> String {
    let env = REPL_ENV.with(|cell| cell.borrow().clone());
    let mut printed = Vec::new();
    match run(&line, env, &mut printed) {
        Ok(value) => {
            let mut out = String::new();
            if !matches!(value, Value::Null) {
                out.push_str(&value.inspect());
                out.push('\n');
            }
            out.push_str(&printed.concat());
            out
        }
        Err(errors) => render_parse_errors(&errors),
    }
}
