//! Unicode-aware lexer.
//!
//! Streams [`Token`]s from a UTF-8 source string on demand. Identifiers may
//! start with an ASCII letter, an underscore, or any code point in the
//! Devanagari block (U+0900..=U+097F); Devanagari keywords are canonicalized
//! to their Latin spelling before classification so every later stage only
//! ever sees Latin literals.

use crate::token::{self, Token, TokenKind};

const DEVANAGARI_START: char = '\u{0900}';
const DEVANAGARI_END: char = '\u{097F}';

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    read_position: usize,
    ch: char,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer { input, position: 0, read_position: 0, ch: '\0' };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        match self.input[self.read_position..].chars().next() {
            Some(ch) => {
                self.position = self.read_position;
                self.read_position += ch.len_utf8();
                self.ch = ch;
            }
            None => {
                self.position = self.read_position;
                self.ch = '\0';
            }
        }
    }

    fn peek_char(&self) -> char {
        self.input[self.read_position..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, ' ' | '\t' | '\r' | '\n') {
            self.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let tok = match self.ch {
            '=' => self.two_char_or_single('=', TokenKind::Eq, TokenKind::Assign),
            '+' => self.two_char_or_single('=', TokenKind::PlusAssign, TokenKind::Plus),
            '-' => self.two_char_or_single('=', TokenKind::MinusAssign, TokenKind::Minus),
            '*' => self.two_char_or_single('=', TokenKind::AsteriskAssign, TokenKind::Asterisk),
            '/' => self.two_char_or_single('=', TokenKind::SlashAssign, TokenKind::Slash),
            '!' => self.two_char_or_single('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.two_char_or_single('=', TokenKind::Lte, TokenKind::Lt),
            '>' => self.two_char_or_single('=', TokenKind::Gte, TokenKind::Gt),
            '%' => self.single(TokenKind::Percent),
            '|' => self.single(TokenKind::Pipe),
            ':' => self.single(TokenKind::Colon),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '"' => {
                let literal = self.read_string();
                Token::new(TokenKind::String, literal)
            }
            '\0' => Token::new(TokenKind::Eof, ""),
            ch if is_identifier_start(ch) => {
                let literal = token::canonicalize(&self.read_identifier()).to_string();
                let kind = token::lookup_ident(&literal);
                return Token::new(kind, literal);
            }
            ch if ch.is_ascii_digit() => return Token::new(TokenKind::Int, self.read_number()),
            other => Token::new(TokenKind::Illegal, other.to_string()),
        };

        self.read_char();
        tok
    }

    fn single(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.ch.to_string())
    }

    /// Resolves the two-character-lookahead ambiguity shared by `==`, `!=`,
    /// and the compound-assignment operators: if `next` follows the current
    /// rune, emit `wide`; otherwise emit `narrow` for the current rune alone.
    fn two_char_or_single(&mut self, next: char, wide: TokenKind, narrow: TokenKind) -> Token {
        if self.peek_char() == next {
            let first = self.ch;
            self.read_char();
            let literal = format!("{}{}", first, self.ch);
            Token::new(wide, literal)
        } else {
            self.single(narrow)
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_identifier_part(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    /// Reads the raw bytes between two `"` delimiters. No escape processing
    /// is performed; `\n` in source remains the two characters `\` and `n`.
    fn read_string(&mut self) -> String {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == '"' || self.ch == '\0' {
                break;
            }
        }
        self.input[start..self.position].to_string()
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || (ch >= DEVANAGARI_START && ch <= DEVANAGARI_END)
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn next_token_covers_delimiters_and_operators() {
        let input = "=+(){}[],:|!*/%<><=>===!=+=-=*=/=";
        let kinds: Vec<TokenKind> = tokens(input).into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Pipe,
                TokenKind::Bang,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Lte,
                TokenKind::Gte,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::AsteriskAssign,
                TokenKind::SlashAssign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn next_token_reads_a_small_program() {
        let input = "mana five = 5|\nmana ten = 10|\nmana add = karya(x, y) {\n  x + y|\n}|\nmana result = add(five, ten)|";
        let kinds: Vec<TokenKind> = tokens(input).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds.first(), Some(&TokenKind::Let));
        assert!(kinds.contains(&TokenKind::Function));
        assert!(kinds.contains(&TokenKind::Pipe));
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn devanagari_identifier_is_canonicalized_and_classified() {
        let mut lexer = Lexer::new("माना x = 5|");
        let first = lexer.next_token();
        assert_eq!(first.kind, TokenKind::Let);
        assert_eq!(first.literal, "mana");
    }

    #[test]
    fn devanagari_variable_name_passes_through_unchanged() {
        let mut lexer = Lexer::new("नमस्ते");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.literal, "नमस्ते");
    }

    #[test]
    fn string_literal_has_no_escape_processing() {
        let mut lexer = Lexer::new("\"hello\\nworld\"");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::String);
        assert_eq!(tok.literal, "hello\\nworld");
    }

    #[test]
    fn illegal_character_is_reported() {
        let mut lexer = Lexer::new("@");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
    }
}
