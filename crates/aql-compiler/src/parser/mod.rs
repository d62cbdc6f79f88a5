//! Lexer, parser and AST for the filter language.
//!
//! # Architecture
//!
//! ```text
//! Source text → scan → Vec<Token> → Parser → ast::Query
//! ```
//!
//! - [`lexer`]: Logos-based scanner producing `Token { kind, span }` pairs.
//!   Tokens are zero-copy; text is sliced from source on demand.
//! - [`Parser`]: recursive descent with one token of lookahead. It fails fast:
//!   the first unexpected token or premature end of input aborts the parse and
//!   no partial tree is returned.
//! - [`ast`]: owned, typed tree consumed by the translator.
//! - [`printer`]: canonical source form (`Display`) and an indented tree dump.
//!
//! # Grammar
//!
//! ```text
//! query      = expression
//! expression = condition (("AND" | "OR") condition)*
//! condition  = "NOT" condition | "(" expression ")" | IDENTIFIER comparator value
//! comparator = "=" | "!=" | ">" | "<" | ">=" | "<=" | "IN"
//! value      = NUMBER | STRING | BOOLEAN | set
//! set        = "{" (scalar ("," scalar)*)? "}"
//! ```
//!
//! `AND` and `OR` have equal precedence and associate to the left.

pub mod ast;
pub mod lexer;
pub mod printer;
pub mod token_kind;

mod core;
mod error;
mod grammar;


pub use ast::{
    CompareOp, Comparison, Expr, Identifier, Literal, LogicalOp, Operand, Query, SetLiteral, Value,
};
pub use self::core::{DEFAULT_RECURSION_LIMIT, Parser};
pub use error::{ParseError, ParseErrorKind, RelatedInfo};
pub use lexer::{LexError, Token, scan};
pub use printer::AstPrinter;
pub use token_kind::{TokenKind, TokenSet};

/// Scans and parses `source` with default limits.
///
/// A scanning failure is reported as a [`ParseError`] of kind
/// [`ParseErrorKind::Lex`] carrying the lexer's message and offset.
pub fn parse(source: &str) -> Result<Query, ParseError> {
    let tokens = scan(source)?;
    Parser::new(source, tokens).parse()
}
