//! AQL compiler: lexer, parser, translator and error rendering.
//!
//! This crate provides the pipeline from filter text to backend calls:
//! - `parser` - token scanner, recursive-descent parser, typed AST, printers
//! - `translate` - lowering of the AST onto a query-construction [`Backend`]
//! - `diagnostics` - error reports against the source text
//! - `query` - high-level facade tying the stages together
//!
//! # Example
//!
//! ```
//! use aql_compiler::QueryBuilder;
//!
//! let query = QueryBuilder::new("YOE > 5 AND SKILLS IN {'Python', 'Java'}")
//!     .parse()
//!     .expect("valid query");
//! assert_eq!(query.ast().fields(), vec!["YOE", "SKILLS"]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod query;
pub mod translate;

#[cfg(test)]
pub mod test_utils;

use rowan::TextRange;

pub use diagnostics::DiagnosticsPrinter;
pub use parser::{LexError, ParseError, ParseErrorKind, RelatedInfo, parse};
pub use query::{ParsedQuery, QueryBuilder};
pub use translate::{Backend, Bind, TranslateError, Translation, translate};

/// Errors from any stage of the pipeline.
///
/// Scanning happens inside parsing, so a [`LexError`] converts to a
/// [`ParseError`] of kind [`ParseErrorKind::Lex`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl Error {
    /// Source range the error points at. Empty for lexer failures.
    pub fn span(&self) -> TextRange {
        match self {
            Error::Parse(err) => err.span,
            Error::Translate(err) => err.span(),
        }
    }

    /// Message without location.
    pub fn message(&self) -> String {
        match self {
            Error::Parse(err) => err.message.clone(),
            Error::Translate(err) => err.to_string(),
        }
    }

    pub fn related(&self) -> Option<&RelatedInfo> {
        match self {
            Error::Parse(err) => err.related.as_ref(),
            Error::Translate(_) => None,
        }
    }

    /// Report against `source` using the plain renderer.
    pub fn render(&self, source: &str) -> String {
        diagnostics::render(source, self)
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Parse(err.into())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
