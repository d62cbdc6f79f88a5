//! Parse error type.

use rowan::TextRange;

use super::lexer::{LexError, Token};

/// What went wrong, independent of the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Scanning failed before parsing began.
    Lex,
    UnexpectedToken,
    UnexpectedEof,
    /// `(` or `{` never closed.
    Unclosed,
    InvalidNumber,
    /// A complete expression followed by more tokens.
    TrailingInput,
    RecursionLimitExceeded,
}

/// Related location, e.g. where an unclosed delimiter was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// The first structural problem found in the token stream.
///
/// `token` is the offending token, absent at end of input and for lexer
/// failures. `span` is always set; at end of input it is empty and sits at the
/// source length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}", offset = usize::from(.span.start()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub token: Option<Token>,
    pub span: TextRange,
    pub related: Option<RelatedInfo>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: TextRange) -> Self {
        Self {
            kind,
            message: message.into(),
            token: None,
            span,
            related: None,
        }
    }

    pub fn at_token(kind: ParseErrorKind, message: impl Into<String>, token: Token) -> Self {
        Self {
            token: Some(token),
            ..Self::new(kind, message, token.span)
        }
    }

    pub fn with_related(mut self, related: RelatedInfo) -> Self {
        self.related = Some(related);
        self
    }

    pub fn offset(&self) -> usize {
        self.span.start().into()
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let span = err.span();
        Self::new(ParseErrorKind::Lex, err.message, span)
    }
}
