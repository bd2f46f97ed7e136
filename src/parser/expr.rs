//! Pratt-style expression parsing: precedence levels plus the prefix/infix
//! handler dispatch that drives [`Parser::parse_expression`].

use crate::ast::{Block, Expr, Identifier, InfixOp, PrefixOp};
use crate::error::ParseError;
use crate::token::TokenKind;

use super::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::Lte | TokenKind::Gte => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

impl<'a> Parser<'a> {
    /// The core Pratt loop: parse a prefix expression, then keep folding in
    /// infix operators as long as the next one binds tighter than
    /// `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Expr {
        let mut left = match self.parse_prefix() {
            Some(expr) => expr,
            None => {
                self.errors.push(ParseError::NoPrefixParseFn(self.cur_token.kind.to_string()));
                return Expr::Comment;
            }
        };

        while precedence < precedence_of(self.peek_token.kind) && self.peek_is_infix_operator() {
            self.next_token();
            left = self.parse_infix(left);
        }

        left
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur_token.kind)
    }

    fn peek_is_infix_operator(&self) -> bool {
        matches!(
            self.peek_token.kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Lte
                | TokenKind::Gte
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::LParen
                | TokenKind::LBracket
        )
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.cur_token.kind {
            TokenKind::Ident => Some(Expr::Identifier(self.cur_token.literal.clone())),
            TokenKind::Int => match self.cur_token.literal.parse::<i64>() {
                Ok(value) => Some(Expr::Integer(value)),
                Err(_) => {
                    self.errors.push(ParseError::InvalidInteger(self.cur_token.literal.clone()));
                    None
                }
            },
            TokenKind::String => Some(Expr::StringLiteral(self.cur_token.literal.clone())),
            TokenKind::True => Some(Expr::Boolean(true)),
            TokenKind::False => Some(Expr::Boolean(false)),
            TokenKind::Bang | TokenKind::Minus => Some(self.parse_prefix_expression()),
            TokenKind::LParen => Some(self.parse_grouped_expression()),
            TokenKind::If => Some(self.parse_if_expression()),
            TokenKind::While => Some(self.parse_while_expression()),
            TokenKind::Function => Some(self.parse_function_literal()),
            TokenKind::LBracket => Some(self.parse_array_literal()),
            TokenKind::LBrace => Some(self.parse_hash_literal()),
            _ => None,
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Expr {
        match self.cur_token.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_prefix_expression(&mut self) -> Expr {
        let op = match self.cur_token.kind {
            TokenKind::Bang => PrefixOp::Bang,
            TokenKind::Minus => PrefixOp::Minus,
            _ => unreachable!("dispatch only calls this for ! and -"),
        };
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix);
        Expr::Prefix { op, right: Box::new(right) }
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Expr {
        let op = match self.cur_token.kind {
            TokenKind::Plus => InfixOp::Plus,
            TokenKind::Minus => InfixOp::Minus,
            TokenKind::Asterisk => InfixOp::Asterisk,
            TokenKind::Slash => InfixOp::Slash,
            TokenKind::Percent => InfixOp::Percent,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Lte => InfixOp::Lte,
            TokenKind::Gte => InfixOp::Gte,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            _ => unreachable!("dispatch only calls this for binary operators"),
        };
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence);
        Expr::Infix { op, left: Box::new(left), right: Box::new(right) }
    }

    fn parse_grouped_expression(&mut self) -> Expr {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Comment;
        }
        expr
    }

    fn parse_if_expression(&mut self) -> Expr {
        if !self.expect_peek(TokenKind::LParen) {
            return Expr::Comment;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Comment;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Comment;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return Expr::Comment;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Expr::If { condition: Box::new(condition), consequence, alternative }
    }

    fn parse_while_expression(&mut self) -> Expr {
        if !self.expect_peek(TokenKind::LParen) {
            return Expr::Comment;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Comment;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Comment;
        }
        let body = self.parse_block_statement();
        Expr::While { condition: Box::new(condition), body }
    }

    pub(crate) fn parse_block_statement(&mut self) -> Block {
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_token_is(TokenKind::RBrace) && !self.cur_token_is(TokenKind::Eof) {
            statements.push(self.parse_statement());
            self.next_token();
        }
        Block(statements)
    }

    fn parse_function_literal(&mut self) -> Expr {
        if !self.expect_peek(TokenKind::LParen) {
            return Expr::Comment;
        }
        let parameters = self.parse_function_parameters();
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Comment;
        }
        let body = self.parse_block_statement();
        Expr::Function { parameters, body }
    }

    fn parse_function_parameters(&mut self) -> Vec<Identifier> {
        let mut params = Vec::new();
        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return params;
        }

        self.next_token();
        params.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            params.push(self.cur_token.literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return Vec::new();
        }
        params
    }

    fn parse_call_expression(&mut self, function: Expr) -> Expr {
        let arguments = self.parse_expression_list(TokenKind::RParen);
        Expr::Call { function: Box::new(function), arguments }
    }

    fn parse_array_literal(&mut self) -> Expr {
        Expr::Array(self.parse_expression_list(TokenKind::RBracket))
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Vec<Expr> {
        let mut list = Vec::new();
        if self.peek_token_is(end) {
            self.next_token();
            return list;
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest));

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest));
        }

        if !self.expect_peek(end) {
            return Vec::new();
        }
        list
    }

    fn parse_hash_literal(&mut self) -> Expr {
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest);
            if !self.expect_peek(TokenKind::Colon) {
                return Expr::Comment;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest);
            pairs.push((key, value));

            if !self.peek_token_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return Expr::Comment;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return Expr::Comment;
        }
        Expr::Hash(pairs)
    }

    /// Parses `left[index]` and the slice form `left[lo:hi]`, distinguished
    /// by whether a `:` follows the first bracketed expression.
    fn parse_index_expression(&mut self, left: Expr) -> Expr {
        self.next_token();
        let first = self.parse_expression(Precedence::Lowest);

        if self.peek_token_is(TokenKind::Colon) {
            self.next_token();
            self.next_token();
            let second = self.parse_expression(Precedence::Lowest);
            if !self.expect_peek(TokenKind::RBracket) {
                return Expr::Comment;
            }
            let slice = Expr::Slice { left: Box::new(first), right: Box::new(second) };
            Expr::SliceArray { left: Box::new(left), slice: Box::new(slice) }
        } else {
            if !self.expect_peek(TokenKind::RBracket) {
                return Expr::Comment;
            }
            Expr::Index { left: Box::new(left), index: Box::new(first) }
        }
    }
}
