//! Lexer for the filter language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! Unlike a resilient lexer, scanning stops at the first position no pattern
//! matches. The returned [`LexError`] carries that byte offset.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::token_kind::TokenKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    /// Zero-based byte offset of the token's first character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start().into()
    }

    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        token_text(source, self)
    }
}

/// No token pattern matches at `offset`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

impl LexError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    /// Zero-width span at the failing offset, clamped to the largest
    /// representable offset.
    pub fn span(&self) -> TextRange {
        TextRange::empty(TextSize::try_from(self.offset).unwrap_or(TextSize::from(u32::MAX)))
    }
}

/// Offsets are `u32`; longer sources cannot be addressed by spans.
pub(super) fn check_source_len(len: usize) -> Result<TextSize, LexError> {
    TextSize::try_from(len).map_err(|_| {
        LexError::new(
            0,
            format!("query of {len} bytes exceeds the limit of {} bytes", u32::MAX),
        )
    })
}

/// Only called once `check_source_len` has accepted the source.
fn range_to_text_range(range: Range<usize>) -> TextRange {
    let offset = |at: usize| TextSize::try_from(at).unwrap_or(TextSize::from(u32::MAX));
    TextRange::new(offset(range.start), offset(range.end))
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Whitespace is skipped. Empty input yields an empty vector. Sources of
/// 4 GiB or more are rejected up front.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    check_source_len(source.len())?;

    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token::new(kind, range_to_text_range(span))),
            Err(()) => {
                let found = source[span.start..].chars().next().unwrap_or_default();
                return Err(LexError::new(
                    span.start,
                    format!("invalid character sequence starting with {found:?}"),
                ));
            }
        }
    }

    log::trace!("scanned {} tokens", tokens.len());
    Ok(tokens)
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
