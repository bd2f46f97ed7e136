//! The six native functions available to every Amrit program.
//!
//! Each is a closure captured behind [`crate::object::BuiltinFn`] so the
//! evaluator can call it exactly like a user-defined function. `print` is
//! the only one that touches the stdout sink; the rest are pure.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::object::{BuiltinFn, Value};

fn registry() -> &'static HashMap<&'static str, BuiltinFn> {
    static REGISTRY: OnceLock<HashMap<&'static str, BuiltinFn>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<&'static str, BuiltinFn> = HashMap::new();
        map.insert("lambai", std::rc::Rc::new(lambai));
        map.insert("print", std::rc::Rc::new(print));
        map.insert("pehla", std::rc::Rc::new(pehla));
        map.insert("aakhri", std::rc::Rc::new(aakhri));
        map.insert("baaki", std::rc::Rc::new(baaki));
        map.insert("push", std::rc::Rc::new(push));
        map.insert("pop", std::rc::Rc::new(pop));
        map
    })
}

/// Looks up `name` as a built-in, returning a fresh [`Value::Builtin`]
/// handle. Called by the evaluator only after the environment chain has
/// missed, so a user `mana lambai = 5|` shadows the built-in of the same
/// name.
pub fn lookup(name: &str) -> Option<Value> {
    registry().get(name).cloned().map(Value::Builtin)
}

fn arity_error(got: usize, want: usize) -> Value {
    Value::Error(format!("wrong number of arguments. got={got}, want={want}"))
}

fn lambai(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::Error(format!("argument to `lambai` not supported, got {}", other.type_name())),
    }
}

/// Renders every argument space-separated into a single trailing-newline
/// line appended to `stdout`. Only the five scalar/container types with an
/// unambiguous one-line `inspect()` are accepted — a `karya`/`HASH` value
/// would need multi-line rendering this builtin doesn't attempt.
fn print(stdout: &mut Vec<String>, args: &[Value]) -> Value {
    for arg in args {
        if !matches!(
            arg,
            Value::String(_) | Value::Integer(_) | Value::Boolean(_) | Value::Null | Value::Array(_)
        ) {
            return Value::Error(format!(
                "argument `{}` of type {} not supported in `print`",
                arg.inspect(),
                arg.type_name()
            ));
        }
    }

    let mut line = String::new();
    for arg in args {
        line.push_str(&arg.inspect());
        line.push(' ');
    }
    line.push('\n');
    stdout.push(line);
    Value::Null
}

fn pehla(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!("argument to `pehla` must be ARRAY, got {}", other.type_name())),
    }
}

fn aakhri(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!("argument to `aakhri` must be ARRAY, got {}", other.type_name())),
    }
}

fn baaki(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[1..].to_vec())
            }
        }
        other => Value::Error(format!("argument to `baaki` must be ARRAY, got {}", other.type_name())),
    }
}

fn push(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 2 {
        return arity_error(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut copy = elements.clone();
            copy.push(args[1].clone());
            Value::Array(copy)
        }
        other => Value::Error(format!("argument to `push` must be ARRAY, got {}", other.type_name())),
    }
}

fn pop(_stdout: &mut Vec<String>, args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[..elements.len() - 1].to_vec())
            }
        }
        other => Value::Error(format!("argument to `pop` must be ARRAY, got {}", other.type_name())),
    }
}
