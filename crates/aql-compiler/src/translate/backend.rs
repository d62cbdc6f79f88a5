//! The query-construction seam.

use aql_core::{Field, Join};

use crate::parser::Literal;

/// A literal bound to a positional parameter slot.
///
/// `index` is zero-based and matches the literal's position in
/// [`Translation::params`](super::Translation::params).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bind<'a> {
    pub index: usize,
    pub value: &'a Literal,
}

/// Receives lowered queries.
///
/// The translator drives a backend through one translation: joins are declared
/// before the first column that needs them, predicates are built bottom-up,
/// and `filter` is called exactly once with the root predicate.
pub trait Backend {
    type Column;
    type Predicate;

    /// Declares a join. The translator never declares the same join twice in
    /// one translation, but implementations should tolerate it.
    fn join(&mut self, join: Join);

    /// Resolves a field against the base relation and the declared joins.
    fn column(&mut self, field: Field) -> Self::Column;

    fn eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;
    fn not_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;
    fn gt(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;
    fn lt(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;
    fn gt_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;
    fn lt_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate;

    /// Set membership. `values` may be empty.
    fn is_in(&mut self, column: Self::Column, values: &[Bind<'_>]) -> Self::Predicate;

    fn and(&mut self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;
    fn or(&mut self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate;
    fn not(&mut self, inner: Self::Predicate) -> Self::Predicate;

    /// Attaches the root predicate as the query's filter.
    fn filter(&mut self, predicate: Self::Predicate);

    /// Final query text.
    fn render(&self) -> String;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    type Column = B::Column;
    type Predicate = B::Predicate;

    fn join(&mut self, join: Join) {
        (**self).join(join)
    }

    fn column(&mut self, field: Field) -> Self::Column {
        (**self).column(field)
    }

    fn eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).eq(column, value)
    }

    fn not_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).not_eq(column, value)
    }

    fn gt(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).gt(column, value)
    }

    fn lt(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).lt(column, value)
    }

    fn gt_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).gt_eq(column, value)
    }

    fn lt_eq(&mut self, column: Self::Column, value: Bind<'_>) -> Self::Predicate {
        (**self).lt_eq(column, value)
    }

    fn is_in(&mut self, column: Self::Column, values: &[Bind<'_>]) -> Self::Predicate {
        (**self).is_in(column, values)
    }

    fn and(&mut self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate {
        (**self).and(left, right)
    }

    fn or(&mut self, left: Self::Predicate, right: Self::Predicate) -> Self::Predicate {
        (**self).or(left, right)
    }

    fn not(&mut self, inner: Self::Predicate) -> Self::Predicate {
        (**self).not(inner)
    }

    fn filter(&mut self, predicate: Self::Predicate) {
        (**self).filter(predicate)
    }

    fn render(&self) -> String {
        (**self).render()
    }
}
