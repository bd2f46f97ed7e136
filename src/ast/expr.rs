use std::fmt;

use super::{Block, Identifier};

/// A prefix operator: `!` or unary `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Bang,
    Minus,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOp::Bang => "!",
            PrefixOp::Minus => "-",
        })
    }
}

/// A binary operator over two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    NotEq,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOp::Plus => "+",
            InfixOp::Minus => "-",
            InfixOp::Asterisk => "*",
            InfixOp::Slash => "/",
            InfixOp::Percent => "%",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Lte => "<=",
            InfixOp::Gte => ">=",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        })
    }
}

/// The operator of a compound-assignment statement (`x += 1|`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    PlusAssign,
    MinusAssign,
    AsteriskAssign,
    SlashAssign,
}

impl fmt::Display for CompoundOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompoundOp::PlusAssign => "+=",
            CompoundOp::MinusAssign => "-=",
            CompoundOp::AsteriskAssign => "*=",
            CompoundOp::SlashAssign => "/=",
        })
    }
}

/// The discriminated sum of expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(i64),
    StringLiteral(String),
    Boolean(bool),
    Array(Vec<Expr>),
    Hash(Vec<(Expr, Expr)>),
    Prefix {
        op: PrefixOp,
        right: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        condition: Box<Expr>,
        body: Block,
    },
    Function {
        parameters: Vec<Identifier>,
        body: Block,
    },
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
    /// The inner `a:b` form of a slice; only meaningful nested inside a
    /// [`Expr::SliceArray`].
    Slice {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    SliceArray {
        left: Box<Expr>,
        slice: Box<Expr>,
    },
    /// A source comment; evaluates as a no-op.
    Comment,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Integer(value) => write!(f, "{value}"),
            Expr::StringLiteral(value) => write!(f, "{value}"),
            Expr::Boolean(value) => write!(f, "{value}"),
            Expr::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Expr::Hash(pairs) => {
                let rendered: Vec<String> =
                    pairs.iter().map(|(k, v)| format!("{k}:{v}")).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Expr::Prefix { op, right } => write!(f, "({op}{right})"),
            Expr::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::If { condition, consequence, alternative } => {
                write!(f, "agar {condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, " varna {alt}")?;
                }
                Ok(())
            }
            Expr::While { condition, body } => write!(f, "jabtak {condition} {body}"),
            Expr::Function { parameters, body } => {
                write!(f, "karya({}) {body}", parameters.join(", "))
            }
            Expr::Call { function, arguments } => {
                let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{function}({})", rendered.join(", "))
            }
            Expr::Index { left, index } => write!(f, "({left}[{index}])"),
            Expr::Slice { left, right } => write!(f, "{left}:{right}"),
            Expr::SliceArray { left, slice } => write!(f, "({left}[{slice}])"),
            Expr::Comment => Ok(()),
        }
    }
}
