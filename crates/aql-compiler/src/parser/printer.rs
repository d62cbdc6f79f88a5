//! Printing the AST.
//!
//! `Display` on AST nodes yields canonical query text that parses back to the
//! same tree. [`AstPrinter`] yields an indented structural dump for debugging
//! and snapshot tests.

use std::fmt::{self, Display, Write};

use rowan::TextRange;

use super::ast::{Comparison, Expr, Literal, Operand, Query, SetLiteral, Value};

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Comparison(comparison) => comparison.fmt(f),
            // NOT takes a single condition; a compound operand needs a group.
            Expr::Not { expr } => match expr.as_ref() {
                Expr::Logical { .. } => write!(f, "NOT ({expr})"),
                _ => write!(f, "NOT {expr}"),
            },
            // Chains lean left, so only a compound right operand needs a group.
            Expr::Logical { .. } => {
                let (first, rest) = self.chain();
                first.fmt(f)?;
                for (op, right) in rest {
                    match right {
                        Expr::Logical { .. } => write!(f, " {} ({right})", op.as_str())?,
                        _ => write!(f, " {} {right}", op.as_str())?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field.name, self.op, self.operand)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(value) => value.fmt(f),
            Operand::Set(set) => set.fmt(f),
        }
    }
}

impl Display for SetLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            value.fmt(f)?;
        }
        f.write_char('}')
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.literal.fmt(f)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            // Keep a fractional part so the text re-scans as the same float.
            Literal::Float(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Literal::Float(x) => write!(f, "{x}"),
            // No escapes exist: pick the quote the content doesn't use.
            Literal::Str(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Literal::Str(s) => write!(f, "'{s}'"),
            Literal::Bool(true) => f.write_str("TRUE"),
            Literal::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// Indented tree dump of a parsed query.
///
/// ```text
/// Query
///   Logical(AND)
///     Comparison(>)
///       Identifier(YOE)
///       Value(5)
/// ```
pub struct AstPrinter<'q> {
    query: &'q Query,
    spans: bool,
}

impl<'q> AstPrinter<'q> {
    pub fn new(query: &'q Query) -> Self {
        Self {
            query,
            spans: false,
        }
    }

    /// Append `start..end` to nodes that carry a span.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "Query")?;
        self.format_expr(&self.query.expr, 1, w)
    }

    fn format_expr(&self, root: &Expr, indent: usize, w: &mut impl Write) -> fmt::Result {
        let mut stack = vec![(root, indent)];
        while let Some((expr, indent)) = stack.pop() {
            let prefix = "  ".repeat(indent);
            match expr {
                Expr::Logical { op, left, right } => {
                    writeln!(w, "{prefix}Logical({})", op.as_str())?;
                    stack.push((&**right, indent + 1));
                    stack.push((&**left, indent + 1));
                }
                Expr::Not { expr } => {
                    writeln!(w, "{prefix}Logical(NOT)")?;
                    stack.push((&**expr, indent + 1));
                }
                Expr::Comparison(comparison) => self.format_comparison(comparison, indent, w)?,
            }
        }
        Ok(())
    }

    fn format_comparison(
        &self,
        comparison: &Comparison,
        indent: usize,
        w: &mut impl Write,
    ) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(
            w,
            "{prefix}Comparison({}){}",
            comparison.op,
            self.span_suffix(comparison.span())
        )?;
        let inner = "  ".repeat(indent + 1);
        writeln!(
            w,
            "{inner}Identifier({}){}",
            comparison.field.name,
            self.span_suffix(comparison.field.span)
        )?;
        match &comparison.operand {
            Operand::Scalar(value) => self.format_value(value, indent + 1, w),
            Operand::Set(set) => {
                writeln!(w, "{inner}Set{}", self.span_suffix(set.span))?;
                for value in &set.values {
                    self.format_value(value, indent + 2, w)?;
                }
                Ok(())
            }
        }
    }

    fn format_value(&self, value: &Value, indent: usize, w: &mut impl Write) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(w, "{prefix}Value({value}){}", self.span_suffix(value.span))
    }

    fn span_suffix(&self, span: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(" {}..{}", u32::from(span.start()), u32::from(span.end()))
    }
}
