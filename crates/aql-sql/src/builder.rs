//! [`Backend`] implementation that builds a `SELECT` over `resumes`.

use aql_compiler::{Backend, Bind};
use aql_core::{ColumnRef, Field, Join, Table};
use indexmap::IndexSet;

use crate::config::SqlConfig;
use crate::sql_ast::{BinaryOperator, Expression, Param, Select, SqlWriter};

/// Builds one SQL query from translator calls.
///
/// Joins are emitted in declaration order; declaring a join twice has no
/// further effect. Each `filter` call is ANDed onto the existing filter.
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    config: SqlConfig,
    select: Select,
    joins: IndexSet<Join>,
}

impl Default for SqlBuilder {
    fn default() -> Self {
        Self::new(SqlConfig::default())
    }
}

impl SqlBuilder {
    pub fn new(config: SqlConfig) -> Self {
        Self {
            config,
            select: Select::new(Table::BASE),
            joins: IndexSet::new(),
        }
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    /// Joins in the order they were declared.
    pub fn joins(&self) -> impl Iterator<Item = Join> + '_ {
        self.joins.iter().copied()
    }

    fn compare(&self, column: ColumnRef, operator: BinaryOperator, value: Bind<'_>) -> Expression {
        Expression::BinaryOperator {
            left: column,
            operator,
            right: Param(value.index),
        }
    }
}

impl Backend for SqlBuilder {
    type Column = ColumnRef;
    type Predicate = Expression;

    fn join(&mut self, join: Join) {
        if !self.joins.insert(join) {
            return;
        }
        log::debug!("sql: LEFT JOIN for `{}`", join.name());
        self.select.joins.extend_from_slice(join.steps());
    }

    fn column(&mut self, field: Field) -> ColumnRef {
        field.column()
    }

    fn eq(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::Equals, value)
    }

    fn not_eq(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::NotEquals, value)
    }

    fn gt(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::GreaterThan, value)
    }

    fn lt(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::LessThan, value)
    }

    fn gt_eq(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::GreaterThanOrEqualTo, value)
    }

    fn lt_eq(&mut self, column: ColumnRef, value: Bind<'_>) -> Expression {
        self.compare(column, BinaryOperator::LessThanOrEqualTo, value)
    }

    fn is_in(&mut self, column: ColumnRef, values: &[Bind<'_>]) -> Expression {
        Expression::In {
            left: column,
            right: values.iter().map(|b| Param(b.index)).collect(),
        }
    }

    fn and(&mut self, left: Expression, right: Expression) -> Expression {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn or(&mut self, left: Expression, right: Expression) -> Expression {
        Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn not(&mut self, inner: Expression) -> Expression {
        Expression::Not(Box::new(inner))
    }

    fn filter(&mut self, predicate: Expression) {
        self.select.filter = Some(match self.select.filter.take() {
            Some(existing) => Expression::And {
                left: Box::new(existing),
                right: Box::new(predicate),
            },
            None => predicate,
        });
    }

    fn render(&self) -> String {
        let mut sql = SqlWriter::new(&self.config);
        self.select.to_sql(&mut sql);
        sql.finish()
    }
}
