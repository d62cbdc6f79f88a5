//! Core parser state machine and low-level operations.
//!
//! This module contains the `Parser` struct and its foundational methods:
//! - Token access and single-token lookahead
//! - Consuming and expecting tokens
//! - Error construction
//! - Recursion depth limiting

use rowan::{TextRange, TextSize};

use super::ast::Query;
use super::error::{ParseError, ParseErrorKind};
use super::lexer::{Token, token_text};
use super::token_kind::{TokenKind, TokenSet};

/// Default nesting limit for `NOT` and parentheses.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Recursive-descent parser over a scanned token stream.
///
/// The token stream is consumed left-to-right with one token of lookahead.
/// There is no recovery: the first problem aborts the parse.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    /// Current position in `tokens`. Monotonically increases.
    pub(super) pos: usize,
    pub(super) depth: u32,
    recursion_limit: Option<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// `None` disables the limit.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Parses the whole token stream. Trailing tokens are an error.
    pub fn parse(mut self) -> Result<Query, ParseError> {
        self.parse_root()
    }

    /// Current token kind, `None` at EOF.
    pub(super) fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn current_token(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    /// Saturates for sources `scan` would have rejected.
    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::try_from(self.source.len()).unwrap_or(TextSize::from(u32::MAX))
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn at_set(&self, set: TokenSet) -> bool {
        self.current().is_some_and(|kind| set.contains(kind))
    }

    pub(super) fn text(&self, token: Token) -> &'src str {
        token_text(self.source, &token)
    }

    /// Consume the current token.
    pub(super) fn bump(&mut self) -> Token {
        assert!(!self.eof(), "bump called at EOF");
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    /// Consume the current token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.at(kind).then(|| self.bump())
    }

    /// Consume a token of the given kind or fail with "expected {what}".
    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        self.eat(kind).ok_or_else(|| self.error_expected(what))
    }

    /// "expected X, found Y" at the current position.
    pub(super) fn error_expected(&self, what: &str) -> ParseError {
        match self.current_token() {
            Some(token) => ParseError::at_token(
                ParseErrorKind::UnexpectedToken,
                format!("expected {what}, found `{}`", self.text(token)),
                token,
            ),
            None => ParseError::new(
                ParseErrorKind::UnexpectedEof,
                format!("expected {what}, found end of input"),
                self.current_span(),
            ),
        }
    }

    pub(super) fn enter_recursion(&mut self) -> Result<(), ParseError> {
        if let Some(limit) = self.recursion_limit
            && self.depth >= limit
        {
            return Err(ParseError::new(
                ParseErrorKind::RecursionLimitExceeded,
                format!("recursion limit exceeded (query nested deeper than {limit} levels)"),
                self.current_span(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
