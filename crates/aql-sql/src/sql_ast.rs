//! A tiny SQL AST covering what filter queries need, and its rendering.

use std::fmt::Write;

use aql_core::{ColumnRef, JoinStep, Table};

use crate::config::{Placeholder, SqlConfig};

/// A parameter slot, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Equals => "=",
            BinaryOperator::NotEquals => "<>",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThanOrEqualTo => ">=",
            BinaryOperator::LessThanOrEqualTo => "<=",
        }
    }
}

/// A boolean condition over columns and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Not(Box<Expression>),
    BinaryOperator {
        left: ColumnRef,
        operator: BinaryOperator,
        right: Param,
    },
    /// An empty list renders as an always-false condition.
    In { left: ColumnRef, right: Vec<Param> },
}

impl Expression {
    fn keyword(&self) -> Option<&'static str> {
        match self {
            Expression::And { .. } => Some("AND"),
            Expression::Or { .. } => Some("OR"),
            _ => None,
        }
    }

    /// Allocation-free leaf left behind by `detach_children`.
    fn hollow() -> Self {
        Expression::In {
            left: ColumnRef::new(Table::BASE, "id"),
            right: Vec::new(),
        }
    }
}

// Translated chains are as deep as they are long; drop them without recursion.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expression, pending: &mut Vec<Expression>) {
    let mut detach = |child: &mut Box<Expression>| {
        if matches!(
            **child,
            Expression::And { .. } | Expression::Or { .. } | Expression::Not(_)
        ) {
            pending.push(std::mem::replace(&mut **child, Expression::hollow()));
        }
    };
    match expr {
        Expression::And { left, right } | Expression::Or { left, right } => {
            detach(left);
            detach(right);
        }
        Expression::Not(inner) => detach(inner),
        Expression::BinaryOperator { .. } | Expression::In { .. } => {}
    }
}

/// `SELECT "base".* FROM "base" LEFT JOIN ... WHERE ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub from: Table,
    pub joins: Vec<JoinStep>,
    pub filter: Option<Expression>,
}

impl Select {
    pub fn new(from: Table) -> Self {
        Self {
            from,
            joins: Vec::new(),
            filter: None,
        }
    }
}

/// Accumulates rendered SQL text.
pub struct SqlWriter<'c> {
    config: &'c SqlConfig,
    sql: String,
}

impl<'c> SqlWriter<'c> {
    pub fn new(config: &'c SqlConfig) -> Self {
        Self {
            config,
            sql: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.sql
    }

    fn append(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn identifier(&mut self, name: &str) {
        if self.config.quote_identifiers {
            self.sql.push('"');
            self.sql.push_str(name);
            self.sql.push('"');
        } else {
            self.sql.push_str(name);
        }
    }

    fn table(&mut self, table: Table) {
        self.identifier(table.name());
    }

    fn column(&mut self, column: ColumnRef) {
        self.table(column.table);
        self.sql.push('.');
        self.identifier(column.column);
    }

    fn param(&mut self, param: Param) {
        match self.config.placeholder {
            Placeholder::Question => self.sql.push('?'),
            Placeholder::Dollar => {
                let _ = write!(self.sql, "${}", param.0 + 1);
            }
        }
    }
}

impl Select {
    pub fn to_sql(&self, sql: &mut SqlWriter<'_>) {
        sql.append("SELECT ");
        sql.table(self.from);
        sql.append(".* FROM ");
        sql.table(self.from);

        for step in &self.joins {
            sql.append(" LEFT JOIN ");
            sql.table(step.table);
            sql.append(" ON ");
            sql.column(step.left);
            sql.append("=");
            sql.column(step.right);
        }

        if let Some(filter) = &self.filter {
            sql.append(" WHERE ");
            filter.to_sql(sql);
        }
    }
}

/// Pending output while rendering an expression.
enum Emit<'e> {
    Expr(&'e Expression),
    Text(&'static str),
}

impl Expression {
    /// Renders with an explicit work list, so chains of any length render
    /// without recursion.
    ///
    /// A left operand is grouped only when its operator differs from its
    /// parent's: `a AND b AND c`, but `(a AND b) OR c`. A compound right
    /// operand is always grouped.
    pub fn to_sql(&self, sql: &mut SqlWriter<'_>) {
        let mut pending = vec![Emit::Expr(self)];
        while let Some(emit) = pending.pop() {
            let expr = match emit {
                Emit::Text(text) => {
                    sql.append(text);
                    continue;
                }
                Emit::Expr(expr) => expr,
            };
            match expr {
                Expression::And { left, right } | Expression::Or { left, right } => {
                    let keyword = expr.keyword();
                    push_operand(&mut pending, right, right.keyword().is_some());
                    pending.push(Emit::Text(match expr {
                        Expression::Or { .. } => " OR ",
                        _ => " AND ",
                    }));
                    let grouped = left.keyword().is_some_and(|inner| Some(inner) != keyword);
                    push_operand(&mut pending, left, grouped);
                }
                Expression::Not(inner) => {
                    pending.push(Emit::Text(")"));
                    pending.push(Emit::Expr(&**inner));
                    pending.push(Emit::Text("NOT ("));
                }
                Expression::BinaryOperator {
                    left,
                    operator,
                    right,
                } => {
                    sql.column(*left);
                    sql.append(" ");
                    sql.append(operator.as_str());
                    sql.append(" ");
                    sql.param(*right);
                }
                Expression::In { right, .. } if right.is_empty() => sql.append("1 = 0"),
                Expression::In { left, right } => {
                    sql.column(*left);
                    sql.append(" IN (");
                    for (i, param) in right.iter().enumerate() {
                        if i > 0 {
                            sql.append(", ");
                        }
                        sql.param(*param);
                    }
                    sql.append(")");
                }
            }
        }
    }
}

/// Pushes in reverse, since `pending` is a stack.
fn push_operand<'e>(pending: &mut Vec<Emit<'e>>, operand: &'e Expression, grouped: bool) {
    if grouped {
        pending.push(Emit::Text(")"));
        pending.push(Emit::Expr(operand));
        pending.push(Emit::Text("("));
    } else {
        pending.push(Emit::Expr(operand));
    }
}
