//! The runtime value model: [`Value`], lexical [`Environment`]s, and the
//! hash-key protocol that lets Integer/Boolean/String values serve as Hash
//! keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Identifier};

/// The type tag every [`Value`] reports via [`Value::type_name`]; reused
/// verbatim in evaluator error messages.
pub const INTEGER_OBJ: &str = "INTEGER";
pub const BOOLEAN_OBJ: &str = "BOOLEAN";
pub const STRING_OBJ: &str = "STRING";
pub const NULL_OBJ: &str = "NULL";
pub const ARRAY_OBJ: &str = "ARRAY";
pub const HASH_OBJ: &str = "HASH";
pub const FUNCTION_OBJ: &str = "FUNCTION";
pub const BUILTIN_OBJ: &str = "BUILTIN";
pub const RETURN_VALUE_OBJ: &str = "RETURN_VALUE";
pub const ERROR_OBJ: &str = "ERROR";
pub const SLICE_OBJ: &str = "SLICE";

/// A native function backing one of the six built-ins in the language
/// surface. Takes the stdout sink (for `print`) plus the evaluated
/// argument list.
pub type BuiltinFn = Rc<dyn Fn(&mut Vec<String>, &[Value]) -> Value>;

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("parameters", &self.parameters).finish()
    }
}

/// The tag half of a [`HashKey`]: which value variant produced the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKeyTag {
    Integer,
    Boolean,
    String,
}

/// A content-derived key into [`Value::Hash`]. Two values that are `==` in
/// Amrit always produce the same `HashKey`, regardless of whether they are
/// the same Rust allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: HashKeyTag,
    pub value: u64,
}

/// FNV-1a, 64-bit: the same string-hashing algorithm used by the reference
/// implementation's hash-key protocol.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// The runtime value protocol.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Value>),
    /// Maps a computed [`HashKey`] to the original key `Value` (preserved
    /// for `inspect`/iteration) and the stored value.
    Hash(Vec<(HashKey, Value, Value)>),
    Function(Function),
    Builtin(BuiltinFn),
    /// Carrier used to hoist a `labh` expression's value out of nested
    /// blocks up to the enclosing function-call frame. Never observed by
    /// user code: the top-level program and `applyFunction` both strip it.
    ReturnValue(Box<Value>),
    Error(String),
    /// The evaluated bounds of a `[a:b]` slice expression, prior to being
    /// applied to an array by `SliceArray`.
    Slice(Box<Value>, Box<Value>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.inspect())
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => INTEGER_OBJ,
            Value::Boolean(_) => BOOLEAN_OBJ,
            Value::String(_) => STRING_OBJ,
            Value::Null => NULL_OBJ,
            Value::Array(_) => ARRAY_OBJ,
            Value::Hash(_) => HASH_OBJ,
            Value::Function(_) => FUNCTION_OBJ,
            Value::Builtin(_) => BUILTIN_OBJ,
            Value::ReturnValue(_) => RETURN_VALUE_OBJ,
            Value::Error(_) => ERROR_OBJ,
            Value::Slice(..) => SLICE_OBJ,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(value) => value.to_string(),
            Value::Boolean(value) => value.to_string(),
            Value::String(value) => value.clone(),
            Value::Null => "null".to_string(),
            Value::Array(elements) => {
                let parts: Vec<String> = elements.iter().map(Value::inspect).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Hash(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(_, key, value)| format!("{}: {}", key.inspect(), value.inspect()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(func) => {
                format!("karya({}) {{...}}", func.parameters.join(", "))
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::ReturnValue(inner) => inner.inspect(),
            Value::Error(message) => format!("ERROR: {message}"),
            Value::Slice(left, right) => format!("{}:{}", left.inspect(), right.inspect()),
        }
    }

    /// Returns the [`HashKey`] for Integer, Boolean, and String values;
    /// every other variant is unhashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(value) => {
                Some(HashKey { tag: HashKeyTag::Integer, value: *value as u64 })
            }
            Value::Boolean(value) => {
                Some(HashKey { tag: HashKeyTag::Boolean, value: if *value { 1 } else { 0 } })
            }
            Value::String(value) => {
                Some(HashKey { tag: HashKeyTag::String, value: fnv1a_64(value.as_bytes()) })
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }
}

/// A lexical scope: a name-to-value map plus an optional link to the
/// enclosing scope. Lookup walks outward on miss; `set` always writes into
/// the innermost frame.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { store: HashMap::new(), outer: None }))
    }

    pub fn enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { store: HashMap::new(), outer: Some(outer) }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Writes `value` into whichever environment currently holds `name`
    /// (walking outward), for compound assignment. Returns `false` if no
    /// enclosing scope holds the binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if self.store.contains_key(name) {
            self.store.insert(name.to_string(), value);
            return true;
        }
        match &self.outer {
            Some(outer) => outer.borrow_mut().assign(name, value),
            None => false,
        }
    }
}
