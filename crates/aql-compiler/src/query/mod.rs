//! High-level facade: source text in, parsed query or translation out.

use crate::Result;
use crate::parser::{AstPrinter, DEFAULT_RECURSION_LIMIT, ParseError, Parser, Query, scan};
use crate::translate::{Backend, Translation, translate};

#[cfg(test)]
mod query_tests;

/// Configures and runs scanning and parsing.
///
/// ```
/// use aql_compiler::QueryBuilder;
///
/// let err = QueryBuilder::new("NOT NOT NOT YOE > 5")
///     .with_recursion_limit(Some(2))
///     .parse()
///     .unwrap_err();
/// assert!(err.to_string().starts_with("recursion limit exceeded"));
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder<'src> {
    source: &'src str,
    recursion_limit: Option<u32>,
}

impl<'src> QueryBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Set the nesting limit for `NOT` and parentheses. None = infinite.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Scanning failures surface as [`Error::Parse`] with kind
    /// [`ParseErrorKind::Lex`](crate::ParseErrorKind::Lex).
    pub fn parse(self) -> Result<ParsedQuery<'src>> {
        let tokens = scan(self.source).map_err(ParseError::from)?;
        let ast = Parser::new(self.source, tokens)
            .with_recursion_limit(self.recursion_limit)
            .parse()?;
        Ok(ParsedQuery {
            source: self.source,
            ast,
        })
    }
}

/// A successfully parsed query together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery<'src> {
    source: &'src str,
    ast: Query,
}

impl<'src> ParsedQuery<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn ast(&self) -> &Query {
        &self.ast
    }

    pub fn into_ast(self) -> Query {
        self.ast
    }

    /// Indented tree dump, see [`AstPrinter`].
    pub fn dump(&self) -> String {
        AstPrinter::new(&self.ast).dump()
    }

    pub fn translate<B: Backend>(&self, backend: B) -> Result<Translation<B>> {
        Ok(translate(&self.ast, backend)?)
    }

    /// Renders an error from this query's pipeline against its source.
    pub fn render_error(&self, error: &crate::Error) -> String {
        error.render(self.source)
    }
}
