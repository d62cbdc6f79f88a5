//! Typed AST produced by the parser.
//!
//! The tree is strictly owned: every node belongs to exactly one parent.
//! Spans point back into the source text for diagnostics and are not part of
//! the serialized form.

use rowan::TextRange;
use serde::Serialize;

/// Root node, exactly one expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    /// `left AND right` / `left OR right`. Chains lean left.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `NOT condition`
    Not { expr: Box<Expr> },
    Comparison(Comparison),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// `FIELD op value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub field: Identifier,
    pub op: CompareOp,
    #[serde(rename = "value")]
    pub operand: Operand,
}

impl Comparison {
    /// From the field name to the end of the value.
    pub fn span(&self) -> TextRange {
        self.field.span.cover(self.operand.span())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "IN")]
    In,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::GtEq => ">=",
            CompareOp::LtEq => "<=",
            CompareOp::In => "IN",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name as written. Not validated against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identifier {
    pub name: String,
    #[serde(skip)]
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Scalar(Value),
    Set(SetLiteral),
}

impl Operand {
    pub fn span(&self) -> TextRange {
        match self {
            Operand::Scalar(value) => value.span,
            Operand::Set(set) => set.span,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Operand::Set(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Value {
    pub literal: Literal,
    #[serde(skip)]
    pub span: TextRange,
}

/// `{v1, v2, ...}`, possibly empty. Element order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SetLiteral {
    pub values: Vec<Value>,
    #[serde(skip)]
    pub span: TextRange,
}

impl SetLiteral {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// A literal value. String contents carry no quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Query {
    /// Comparisons in source order.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        self.expr.comparisons()
    }

    /// Field names in source order, duplicates included.
    pub fn fields(&self) -> Vec<&str> {
        self.comparisons()
            .into_iter()
            .map(|c| c.field.name.as_str())
            .collect()
    }
}

impl Expr {
    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(expr: Expr) -> Self {
        Expr::Not {
            expr: Box::new(expr),
        }
    }

    /// Unrolls a left-leaning AND/OR chain into its leftmost operand and the
    /// `(op, right)` pairs that follow it, in source order. A non-logical
    /// expression is its own leftmost operand.
    pub fn chain(&self) -> (&Expr, Vec<(LogicalOp, &Expr)>) {
        let mut rest = Vec::new();
        let mut first = self;
        while let Expr::Logical { op, left, right } = first {
            rest.push((*op, &**right));
            first = &**left;
        }
        rest.reverse();
        (first, rest)
    }

    /// Pre-order traversal, left operand before right.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            visit(expr);
            match expr {
                Expr::Logical { left, right, .. } => {
                    stack.push(&**right);
                    stack.push(&**left);
                }
                Expr::Not { expr } => stack.push(&**expr),
                Expr::Comparison(_) => {}
            }
        }
    }

    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.walk(&mut |expr| {
            if let Expr::Comparison(comparison) = expr {
                out.push(comparison);
            }
        });
        out
    }

    /// Nesting depth; a lone comparison has depth 1.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, depth)) = stack.pop() {
            max = max.max(depth);
            match expr {
                Expr::Logical { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
                Expr::Not { expr } => stack.push((&**expr, depth + 1)),
                Expr::Comparison(_) => {}
            }
        }
        max
    }

    /// Allocation-free leaf left behind by `detach_children`.
    fn hollow() -> Self {
        let span = TextRange::empty(0.into());
        Expr::Comparison(Comparison {
            field: Identifier {
                name: String::new(),
                span,
            },
            op: CompareOp::Eq,
            operand: Operand::Set(SetLiteral {
                values: Vec::new(),
                span,
            }),
        })
    }
}

// A flat chain of N conditions is a tree N levels deep. Tear it down with a
// work list so dropping never recurses.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    let mut detach = |child: &mut Box<Expr>| {
        if !matches!(**child, Expr::Comparison(_)) {
            pending.push(std::mem::replace(&mut **child, Expr::hollow()));
        }
    };
    match expr {
        Expr::Logical { left, right, .. } => {
            detach(left);
            detach(right);
        }
        Expr::Not { expr } => detach(expr),
        Expr::Comparison(_) => {}
    }
}
