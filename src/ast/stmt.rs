use std::fmt;

use super::{CompoundOp, Expr, Identifier};

/// A sequence of statements, used for function bodies and the bodies of
/// `agar`/`varna`/`jabtak` blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(pub Vec<Stmt>);

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.0 {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// The root of a parsed program: an ordered sequence of top-level
/// statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program(pub Vec<Stmt>);

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.0 {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// The discriminated sum of statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let {
        name: Identifier,
        value: Expr,
    },
    Return {
        value: Expr,
    },
    Expression {
        expr: Expr,
    },
    CompoundAssignment {
        name: Identifier,
        op: CompoundOp,
        value: Expr,
    },
    Block(Block),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "mana {name} = {value}|"),
            Stmt::Return { value } => write!(f, "labh {value}|"),
            Stmt::Expression { expr } => write!(f, "{expr}"),
            Stmt::CompoundAssignment { name, op, value } => {
                write!(f, "{name} {op} {value}|")
            }
            Stmt::Block(block) => write!(f, "{block}"),
        }
    }
}
