//! Translation of a parsed query into backend calls.
//!
//! - `Comparison` resolves its field in the catalog, declares the field's join
//!   once per translation, asks the backend for the column and binds its
//!   literal(s) as parameters in source order.
//! - `NOT`, `AND` and `OR` map onto the backend's predicate combinators.
//! - The root predicate is attached with [`Backend::filter`].
//!
//! Fields and operand shapes are checked for the whole tree before the
//! backend receives its first call.

mod backend;
mod error;
mod translator;


use aql_core::Join;

pub use backend::{Backend, Bind};
pub use error::TranslateError;
pub use translator::Translator;

use crate::parser::{Literal, Query};

/// Outcome of a successful translation.
#[derive(Debug)]
pub struct Translation<B> {
    /// The backend after `filter` was called.
    pub backend: B,
    /// Bound literals, in the order the backend saw them.
    pub params: Vec<Literal>,
    /// Joins declared, in first-use order.
    pub joins: Vec<Join>,
}

impl<B: Backend> Translation<B> {
    pub fn render(&self) -> String {
        self.backend.render()
    }
}

/// Lowers `query` onto `backend`.
pub fn translate<B: Backend>(query: &Query, backend: B) -> Result<Translation<B>, TranslateError> {
    Translator::new(backend).translate(query)
}
