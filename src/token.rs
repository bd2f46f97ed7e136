//! Token kinds and the keyword registries that classify identifiers.
//!
//! Amrit source may spell its seven keywords in Latin transliteration or in
//! Devanagari. The lexer canonicalizes Devanagari spellings to their Latin
//! form before classification, so every later stage of the pipeline only
//! ever sees Latin literals.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// The closed set of token kinds Amrit's lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals.
    Ident,
    Int,
    String,

    // Operators.
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Percent,
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    NotEq,
    PlusAssign,
    MinusAssign,
    AsteriskAssign,
    SlashAssign,

    // Delimiters.
    Pipe,
    Comma,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords.
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    While,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "ANK",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Lte => "<=",
            TokenKind::Gte => ">=",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::AsteriskAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::Pipe => "|",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "karya",
            TokenKind::Let => "mana",
            TokenKind::True => "satya",
            TokenKind::False => "asatya",
            TokenKind::If => "agar",
            TokenKind::Else => "varna",
            TokenKind::Return => "labh",
            TokenKind::While => "jabtak",
        })
    }
}

/// A lexed token: its kind plus the literal text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token { kind, literal: literal.into() }
    }
}

fn keywords_latin() -> &'static HashMap<&'static str, TokenKind> {
    static MAP: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("karya", TokenKind::Function),
            ("mana", TokenKind::Let),
            ("satya", TokenKind::True),
            ("asatya", TokenKind::False),
            ("agar", TokenKind::If),
            ("varna", TokenKind::Else),
            ("labh", TokenKind::Return),
            ("jabtak", TokenKind::While),
        ])
    })
}

fn keywords_devanagari() -> &'static HashMap<&'static str, TokenKind> {
    static MAP: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("कार्य", TokenKind::Function),
            ("माना", TokenKind::Let),
            ("सत्य", TokenKind::True),
            ("असत्य", TokenKind::False),
            ("अगर", TokenKind::If),
            ("वरना", TokenKind::Else),
            ("लाभ", TokenKind::Return),
            ("जबतक", TokenKind::While),
        ])
    })
}

fn devanagari_to_latin() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("कार्य", "karya"),
            ("माना", "mana"),
            ("सत्य", "satya"),
            ("असत्य", "asatya"),
            ("अगर", "agar"),
            ("वरना", "varna"),
            ("लाभ", "labh"),
            ("जबतक", "jabtak"),
        ])
    })
}

/// Classifies `text` as a keyword (Latin or Devanagari spelling) or a plain
/// identifier.
pub fn lookup_ident(text: &str) -> TokenKind {
    if let Some(kind) = keywords_latin().get(text) {
        return *kind;
    }
    if let Some(kind) = keywords_devanagari().get(text) {
        return *kind;
    }
    TokenKind::Ident
}

/// Rewrites a Devanagari keyword spelling to its Latin canonical form.
/// Non-keyword text (including ordinary Devanagari identifiers) passes
/// through unchanged.
pub fn canonicalize(text: &str) -> &str {
    devanagari_to_latin().get(text).copied().unwrap_or(text)
}
