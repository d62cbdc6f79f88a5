//! Lowering of the AST onto a [`Backend`].
//!
//! Two passes over the tree. The first resolves every comparison and stops at
//! the first unknown field or operand mismatch, so a failing query never
//! reaches the backend. The second walks the tree again, declares joins on
//! first use and builds predicates bottom-up, left operand first.

use aql_core::{Field, Join};
use indexmap::IndexSet;

use crate::parser::{CompareOp, Comparison, Expr, Literal, LogicalOp, Operand, Query, Value};

use super::Translation;
use super::backend::{Backend, Bind};
use super::error::TranslateError;

/// Comparison operators that take a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl ScalarOp {
    /// `None` for `IN`, the only set operator.
    fn from_compare(op: CompareOp) -> Option<Self> {
        match op {
            CompareOp::Eq => Some(ScalarOp::Eq),
            CompareOp::NotEq => Some(ScalarOp::NotEq),
            CompareOp::Gt => Some(ScalarOp::Gt),
            CompareOp::Lt => Some(ScalarOp::Lt),
            CompareOp::GtEq => Some(ScalarOp::GtEq),
            CompareOp::LtEq => Some(ScalarOp::LtEq),
            CompareOp::In => None,
        }
    }
}

/// A comparison whose field and operand shape have been checked.
enum Resolved<'q> {
    Scalar {
        field: Field,
        op: ScalarOp,
        value: &'q Literal,
    },
    In {
        field: Field,
        values: &'q [Value],
    },
}

impl Resolved<'_> {
    fn field(&self) -> Field {
        match self {
            Resolved::Scalar { field, .. } | Resolved::In { field, .. } => *field,
        }
    }
}

fn resolve(comparison: &Comparison) -> Result<Resolved<'_>, TranslateError> {
    let Some(field) = Field::from_name(&comparison.field.name) else {
        return Err(TranslateError::UnknownField {
            name: comparison.field.name.clone(),
            span: comparison.field.span,
        });
    };

    match (ScalarOp::from_compare(comparison.op), &comparison.operand) {
        (Some(op), Operand::Scalar(value)) => Ok(Resolved::Scalar {
            field,
            op,
            value: &value.literal,
        }),
        (None, Operand::Set(set)) => Ok(Resolved::In {
            field,
            values: &set.values,
        }),
        (None, Operand::Scalar(value)) => Err(TranslateError::ScalarWithIn {
            field,
            span: value.span,
        }),
        (Some(_), Operand::Set(set)) => Err(TranslateError::SetWithScalarOperator {
            field,
            op: comparison.op,
            span: set.span,
        }),
    }
}

/// Pending work while lowering.
enum Task<'q> {
    Lower(&'q Expr),
    /// Pops the right then the left predicate.
    Combine(LogicalOp),
    Negate,
}

/// Per-call translation state.
///
/// The join set and the parameter list belong to one translation; nothing is
/// shared between calls.
pub struct Translator<B: Backend> {
    backend: B,
    params: Vec<Literal>,
    joins: IndexSet<Join>,
}

impl<B: Backend> Translator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            params: Vec::new(),
            joins: IndexSet::new(),
        }
    }

    pub fn translate(mut self, query: &Query) -> Result<Translation<B>, TranslateError> {
        for comparison in query.comparisons() {
            resolve(comparison)?;
        }

        let predicate = self.lower(&query.expr)?;
        self.backend.filter(predicate);
        log::debug!(
            "translated query: {} join(s), {} parameter(s)",
            self.joins.len(),
            self.params.len()
        );

        Ok(Translation {
            backend: self.backend,
            params: self.params,
            joins: self.joins.into_iter().collect(),
        })
    }

    /// Lowers `root` bottom-up with an explicit work list, so a flat chain
    /// of any length never deepens the call stack. Operands are lowered left
    /// before right, which fixes parameter and join order.
    fn lower(&mut self, root: &Expr) -> Result<B::Predicate, TranslateError> {
        let mut tasks = vec![Task::Lower(root)];
        let mut lowered: Vec<B::Predicate> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Lower(Expr::Logical { op, left, right }) => {
                    tasks.push(Task::Combine(*op));
                    tasks.push(Task::Lower(&**right));
                    tasks.push(Task::Lower(&**left));
                }
                Task::Lower(Expr::Not { expr }) => {
                    tasks.push(Task::Negate);
                    tasks.push(Task::Lower(&**expr));
                }
                Task::Lower(Expr::Comparison(comparison)) => {
                    let predicate = self.lower_comparison(comparison)?;
                    lowered.push(predicate);
                }
                Task::Combine(op) => {
                    let right = lowered.pop().expect("right operand lowered");
                    let left = lowered.pop().expect("left operand lowered");
                    lowered.push(match op {
                        LogicalOp::And => self.backend.and(left, right),
                        LogicalOp::Or => self.backend.or(left, right),
                    });
                }
                Task::Negate => {
                    let inner = lowered.pop().expect("operand lowered");
                    lowered.push(self.backend.not(inner));
                }
            }
        }

        Ok(lowered.pop().expect("root lowered"))
    }

    fn lower_comparison(&mut self, comparison: &Comparison) -> Result<B::Predicate, TranslateError> {
        let resolved = resolve(comparison)?;
        let field = resolved.field();

        if let Some(join) = field.join() {
            self.declare_join(join);
        }
        let column = self.backend.column(field);

        let predicate = match resolved {
            Resolved::Scalar { op, value, .. } => {
                let bind = self.bind(value);
                match op {
                    ScalarOp::Eq => self.backend.eq(column, bind),
                    ScalarOp::NotEq => self.backend.not_eq(column, bind),
                    ScalarOp::Gt => self.backend.gt(column, bind),
                    ScalarOp::Lt => self.backend.lt(column, bind),
                    ScalarOp::GtEq => self.backend.gt_eq(column, bind),
                    ScalarOp::LtEq => self.backend.lt_eq(column, bind),
                }
            }
            Resolved::In { values, .. } => {
                let binds: Vec<Bind<'_>> = values.iter().map(|v| self.bind(&v.literal)).collect();
                self.backend.is_in(column, &binds)
            }
        };
        Ok(predicate)
    }

    fn declare_join(&mut self, join: Join) {
        if self.joins.insert(join) {
            log::debug!("declaring join `{}`", join.name());
            self.backend.join(join);
        }
    }

    fn bind<'v>(&mut self, value: &'v Literal) -> Bind<'v> {
        let index = self.params.len();
        self.params.push(value.clone());
        Bind { index, value }
    }
}
