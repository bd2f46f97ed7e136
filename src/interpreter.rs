//! The tree-walking evaluator.
//!
//! `eval_program` and `eval_block_statement` differ in one crucial way:
//! the program unwraps a [`Value::ReturnValue`] into its inner value (a
//! `labh` at top level just produces that value), while a block hands the
//! wrapper up unopened so an enclosing function call, or an enclosing
//! `agar` block, can see that a return is in flight and stop executing
//! sibling statements. `jabtak` is the one place that doesn't forward it
//! further: `eval_while_expression` evaluates its body through the same
//! block evaluator but only inspects the result for an `Error`, discarding
//! any `ReturnValue` each iteration.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::builtins;
use crate::object::{Environment, Value};

type Env = Rc<RefCell<Environment>>;

pub fn eval_program(program: &Program, env: Env, stdout: &mut Vec<String>) -> Value {
    let mut result = Value::Null;
    for stmt in &program.0 {
        result = eval_statement(stmt, env.clone(), stdout);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &Block, env: Env, stdout: &mut Vec<String>) -> Value {
    let mut result = Value::Null;
    for stmt in &block.0 {
        result = eval_statement(stmt, env.clone(), stdout);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Stmt, env: Env, stdout: &mut Vec<String>) -> Value {
    match stmt {
        Stmt::Let { name, value } => {
            let val = eval_expression(value, env.clone(), stdout);
            if val.is_error() {
                return val;
            }
            env.borrow_mut().set(name.clone(), val);
            Value::Null
        }
        Stmt::Return { value } => {
            let val = eval_expression(value, env, stdout);
            if val.is_error() {
                return val;
            }
            Value::ReturnValue(Box::new(val))
        }
        Stmt::Expression { expr } => eval_expression(expr, env, stdout),
        Stmt::CompoundAssignment { name, op, value } => {
            eval_compound_assignment(name, *op, value, env, stdout)
        }
        Stmt::Block(block) => eval_block_statement(block, env, stdout),
    }
}

fn eval_compound_assignment(
    name: &str,
    op: crate::ast::CompoundOp,
    value: &Expr,
    env: Env,
    stdout: &mut Vec<String>,
) -> Value {
    use crate::ast::CompoundOp;

    let rhs = eval_expression(value, env.clone(), stdout);
    if rhs.is_error() {
        return rhs;
    }

    let Some(current) = env.borrow().get(name) else {
        return Value::Error(format!("identifier not found: {name}"));
    };

    let infix_op = match op {
        CompoundOp::PlusAssign => InfixOp::Plus,
        CompoundOp::MinusAssign => InfixOp::Minus,
        CompoundOp::AsteriskAssign => InfixOp::Asterisk,
        CompoundOp::SlashAssign => InfixOp::Slash,
    };

    // Only Integer,Integer is defined for compound assignment — unlike
    // the general infix evaluator, there's no string-concatenation `+=`.
    let updated = match (&current, &rhs) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(infix_op, *l, *r),
        _ => Value::Error(format!(
            "type mismatch: {} {} {}",
            current.type_name(),
            op,
            rhs.type_name()
        )),
    };
    if updated.is_error() {
        return updated;
    }

    env.borrow_mut().assign(name, updated.clone());
    updated
}

fn eval_expression(expr: &Expr, env: Env, stdout: &mut Vec<String>) -> Value {
    match expr {
        Expr::Identifier(name) => eval_identifier(name, &env),
        Expr::Integer(value) => Value::Integer(*value),
        Expr::StringLiteral(value) => Value::String(value.clone()),
        Expr::Boolean(value) => Value::Boolean(*value),
        Expr::Array(elements) => {
            let values = match eval_expressions(elements, env, stdout) {
                Ok(values) => values,
                Err(err) => return err,
            };
            Value::Array(values)
        }
        Expr::Hash(pairs) => eval_hash_literal(pairs, env, stdout),
        Expr::Prefix { op, right } => {
            let right_val = eval_expression(right, env, stdout);
            if right_val.is_error() {
                return right_val;
            }
            eval_prefix(*op, right_val)
        }
        Expr::Infix { op, left, right } => {
            let left_val = eval_expression(left, env.clone(), stdout);
            if left_val.is_error() {
                return left_val;
            }
            let right_val = eval_expression(right, env, stdout);
            if right_val.is_error() {
                return right_val;
            }
            eval_infix(*op, left_val, right_val)
        }
        Expr::If { condition, consequence, alternative } => {
            eval_if_expression(condition, consequence, alternative.as_ref(), env, stdout)
        }
        Expr::While { condition, body } => eval_while_expression(condition, body, env, stdout),
        Expr::Function { parameters, body } => Value::Function(crate::object::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env,
        }),
        Expr::Call { function, arguments } => {
            eval_call_expression(function, arguments, env, stdout)
        }
        Expr::Index { left, index } => eval_index_expression(left, index, env, stdout),
        Expr::Slice { left, right } => {
            let lo = eval_expression(left, env.clone(), stdout);
            if lo.is_error() {
                return lo;
            }
            let hi = eval_expression(right, env, stdout);
            if hi.is_error() {
                return hi;
            }
            Value::Slice(Box::new(lo), Box::new(hi))
        }
        Expr::SliceArray { left, slice } => eval_slice_array(left, slice, env, stdout),
        Expr::Comment => Value::Null,
    }
}

fn eval_identifier(name: &str, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Value::Error(format!("identifier not found: {name}"))
}

fn eval_expressions(exprs: &[Expr], env: Env, stdout: &mut Vec<String>) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env.clone(), stdout);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_hash_literal(pairs: &[(Expr, Expr)], env: Env, stdout: &mut Vec<String>) -> Value {
    let mut entries = Vec::with_capacity(pairs.len());
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env.clone(), stdout);
        if key.is_error() {
            return key;
        }
        let Some(hash_key) = key.hash_key() else {
            return Value::Error(format!("unusable as hash key: {}", key.type_name()));
        };
        let value = eval_expression(value_expr, env.clone(), stdout);
        if value.is_error() {
            return value;
        }
        entries.push((hash_key, key, value));
    }
    Value::Hash(entries)
}

fn eval_prefix(op: PrefixOp, right: Value) -> Value {
    match op {
        PrefixOp::Bang => Value::Boolean(!right.is_truthy()),
        PrefixOp::Minus => match right {
            Value::Integer(value) => Value::Integer(value.wrapping_neg()),
            other => Value::Error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

fn eval_infix(op: InfixOp, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::String(l), Value::String(r)) => eval_string_infix(op, l, r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_infix(op, *l, *r, &left, &right),
        _ if left.type_name() != right.type_name() => Value::Error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        )),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            op,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(op: InfixOp, left: i64, right: i64) -> Value {
    match op {
        InfixOp::Plus => Value::Integer(left.wrapping_add(right)),
        InfixOp::Minus => Value::Integer(left.wrapping_sub(right)),
        InfixOp::Asterisk => Value::Integer(left.wrapping_mul(right)),
        InfixOp::Slash => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_div(right))
            }
        }
        InfixOp::Percent => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left.wrapping_rem(right))
            }
        }
        InfixOp::Lt => Value::Boolean(left < right),
        InfixOp::Gt => Value::Boolean(left > right),
        InfixOp::Lte => Value::Boolean(left <= right),
        InfixOp::Gte => Value::Boolean(left >= right),
        InfixOp::Eq => Value::Boolean(left == right),
        InfixOp::NotEq => Value::Boolean(left != right),
    }
}

fn eval_string_infix(op: InfixOp, left: &str, right: &str) -> Value {
    match op {
        InfixOp::Plus => Value::String(format!("{left}{right}")),
        InfixOp::Eq => Value::Boolean(left == right),
        InfixOp::NotEq => Value::Boolean(left != right),
        _ => Value::Error(format!("unknown operator: STRING {op} STRING")),
    }
}

fn eval_boolean_infix(op: InfixOp, left: bool, right: bool, left_val: &Value, right_val: &Value) -> Value {
    match op {
        InfixOp::Eq => Value::Boolean(left == right),
        InfixOp::NotEq => Value::Boolean(left != right),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            left_val.type_name(),
            op,
            right_val.type_name()
        )),
    }
}

fn eval_if_expression(
    condition: &Expr,
    consequence: &Block,
    alternative: Option<&Block>,
    env: Env,
    stdout: &mut Vec<String>,
) -> Value {
    let cond_val = eval_expression(condition, env.clone(), stdout);
    if cond_val.is_error() {
        return cond_val;
    }
    if cond_val.is_truthy() {
        eval_block_statement(consequence, env, stdout)
    } else if let Some(alt) = alternative {
        eval_block_statement(alt, env, stdout)
    } else {
        Value::Null
    }
}

/// The body is evaluated purely for side effects — its value, including a
/// `labh` wrapped in `ReturnValue`, is discarded rather than unwinding the
/// loop. Only an error propagates out early.
fn eval_while_expression(condition: &Expr, body: &Block, env: Env, stdout: &mut Vec<String>) -> Value {
    let mut cond_val = eval_expression(condition, env.clone(), stdout);
    if cond_val.is_error() {
        return cond_val;
    }

    while cond_val.is_truthy() {
        let body_result = eval_block_statement(body, env.clone(), stdout);
        if body_result.is_error() {
            return body_result;
        }

        cond_val = eval_expression(condition, env.clone(), stdout);
        if cond_val.is_error() {
            return cond_val;
        }
    }

    Value::Null
}

fn eval_call_expression(function: &Expr, arguments: &[Expr], env: Env, stdout: &mut Vec<String>) -> Value {
    let func_val = eval_expression(function, env.clone(), stdout);
    if func_val.is_error() {
        return func_val;
    }
    let args = match eval_expressions(arguments, env, stdout) {
        Ok(args) => args,
        Err(err) => return err,
    };
    apply_function(func_val, args, stdout)
}

fn apply_function(func: Value, args: Vec<Value>, stdout: &mut Vec<String>) -> Value {
    match func {
        Value::Function(function) => {
            let call_env = Environment::enclosed(function.env.clone());
            for (param, arg) in function.parameters.iter().zip(args.into_iter()) {
                call_env.borrow_mut().set(param.clone(), arg);
            }
            let result = eval_block_statement(&function.body, call_env, stdout);
            match result {
                Value::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Value::Builtin(builtin) => builtin(stdout, &args),
        other => Value::Error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_index_expression(left: &Expr, index: &Expr, env: Env, stdout: &mut Vec<String>) -> Value {
    let left_val = eval_expression(left, env.clone(), stdout);
    if left_val.is_error() {
        return left_val;
    }
    let index_val = eval_expression(index, env, stdout);
    if index_val.is_error() {
        return index_val;
    }

    match (&left_val, &index_val) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Value::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => {
            let Some(key) = index_val.hash_key() else {
                return Value::Error(format!("unusable as hash key: {}", index_val.type_name()));
            };
            pairs
                .iter()
                .find(|(k, _, _)| *k == key)
                .map(|(_, _, value)| value.clone())
                .unwrap_or(Value::Null)
        }
        _ => Value::Error(format!("index operator not supported {}", left_val.type_name())),
    }
}

fn eval_slice_array(left: &Expr, slice: &Expr, env: Env, stdout: &mut Vec<String>) -> Value {
    let left_val = eval_expression(left, env.clone(), stdout);
    if left_val.is_error() {
        return left_val;
    }
    let Value::Array(elements) = &left_val else {
        return Value::Error(format!("slice operator not supported {}", left_val.type_name()));
    };

    let bounds = eval_expression(slice, env, stdout);
    if bounds.is_error() {
        return bounds;
    }
    let Value::Slice(lo, hi) = bounds else {
        unreachable!("Expr::Slice always evaluates to Value::Slice");
    };
    let (Value::Integer(lo), Value::Integer(hi)) = (*lo, *hi) else {
        return Value::Error(format!("slice operator not supported {}", left_val.type_name()));
    };

    let len = elements.len() as i64;
    if lo < 0 || lo > len || hi < 0 || hi > len || lo > hi {
        return Value::Null;
    }
    Value::Array(elements[lo as usize..hi as usize].to_vec())
}
