//! Grammar productions for the filter language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! `AND` and `OR` share one precedence level and fold to the left, so
//! `A AND B OR C` is `(A AND B) OR C`.

use rowan::TextRange;

use super::ast::{
    CompareOp, Comparison, Expr, Identifier, Literal, LogicalOp, Operand, Query, SetLiteral, Value,
};
use super::core::Parser;
use super::error::{ParseError, ParseErrorKind, RelatedInfo};
use super::lexer::Token;
use super::token_kind::TokenKind;
use super::token_kind::token_sets::{
    COMPARATORS, CONDITION_FIRST, LOGICAL_OPS, SCALARS, VALUE_FIRST,
};

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) -> Result<Query, ParseError> {
        let expr = self.parse_expression()?;

        if let Some(token) = self.current_token() {
            return Err(ParseError::at_token(
                ParseErrorKind::TrailingInput,
                format!("expected end of input, found `{}`", self.text(token)),
                token,
            ));
        }

        Ok(Query { expr })
    }

    /// `condition ((AND | OR) condition)*`
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_condition()?;

        while self.at_set(LOGICAL_OPS) {
            let op = match self.bump().kind {
                TokenKind::And => LogicalOp::And,
                _ => LogicalOp::Or,
            };
            let right = self.parse_condition()?;
            expr = Expr::logical(op, expr, right);
        }

        Ok(expr)
    }

    /// `NOT condition | '(' expression ')' | IDENTIFIER comparator value`
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        if !self.at_set(CONDITION_FIRST) {
            return Err(self.error_expected("a condition (field name, 'NOT' or '(')"));
        }

        match self.current() {
            Some(TokenKind::Not) => self.parse_not(),
            Some(TokenKind::ParenOpen) => self.parse_group(),
            _ => self.parse_comparison().map(Expr::Comparison),
        }
    }

    /// NOT binds to the next condition only: `NOT A AND B` is `(NOT A) AND B`.
    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        self.enter_recursion()?;
        self.bump();
        let inner = self.parse_condition();
        self.exit_recursion();
        Ok(Expr::negate(inner?))
    }

    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        self.enter_recursion()?;
        let open = self.bump();
        let inner = self.parse_expression();
        self.exit_recursion();
        let inner = inner?;

        if self.eat(TokenKind::ParenClose).is_none() {
            return Err(self
                .unclosed("')' after expression")
                .with_related(RelatedInfo::new(open.span, "group opened here")));
        }
        Ok(inner)
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let name = self.expect(TokenKind::Identifier, "field name")?;
        let field = Identifier {
            name: self.text(name).to_string(),
            span: name.span,
        };
        let op = self.parse_comparator()?;
        let operand = self.parse_operand()?;
        Ok(Comparison { field, op, operand })
    }

    fn parse_comparator(&mut self) -> Result<CompareOp, ParseError> {
        if !self.at_set(COMPARATORS) {
            return Err(self.error_expected("comparison operator"));
        }
        let op = match self.bump().kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::GtEq => CompareOp::GtEq,
            TokenKind::LtEq => CompareOp::LtEq,
            _ => CompareOp::In,
        };
        Ok(op)
    }

    /// Scalar literal or set literal. Shape/operator agreement is checked later.
    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        if !self.at_set(VALUE_FIRST) {
            return Err(self.error_expected("value"));
        }
        if self.at(TokenKind::BraceOpen) {
            return self.parse_set_literal().map(Operand::Set);
        }
        self.parse_scalar("value").map(Operand::Scalar)
    }

    /// `'{' (value (',' value)*)? '}'`
    fn parse_set_literal(&mut self) -> Result<SetLiteral, ParseError> {
        let open = self.bump();
        let mut values = Vec::new();

        if let Some(close) = self.eat(TokenKind::BraceClose) {
            return Ok(SetLiteral {
                values,
                span: open.span.cover(close.span),
            });
        }

        loop {
            if self.eof() {
                return Err(self.unclosed_set(open));
            }
            values.push(self.parse_scalar("value in set")?);

            if self.eof() {
                return Err(self.unclosed_set(open));
            }
            if let Some(close) = self.eat(TokenKind::BraceClose) {
                return Ok(SetLiteral {
                    values,
                    span: open.span.cover(close.span),
                });
            }
            if self.eat(TokenKind::Comma).is_none() {
                return Err(self.error_expected("',' or '}'"));
            }
        }
    }

    fn parse_scalar(&mut self, what: &str) -> Result<Value, ParseError> {
        if !self.at_set(SCALARS) {
            return Err(self.error_expected(what));
        }
        let token = self.bump();
        let text = self.text(token);
        let literal = match token.kind {
            TokenKind::NumberLit => parse_number(text).ok_or_else(|| {
                ParseError::at_token(
                    ParseErrorKind::InvalidNumber,
                    format!("invalid number `{text}`"),
                    token,
                )
            })?,
            TokenKind::StringLit => Literal::Str(text[1..text.len() - 1].to_string()),
            _ => Literal::Bool(text == "TRUE"),
        };
        Ok(Value {
            literal,
            span: token.span,
        })
    }

    fn unclosed(&self, what: &str) -> ParseError {
        let mut err = self.error_expected(what);
        if err.kind == ParseErrorKind::UnexpectedEof {
            err.kind = ParseErrorKind::Unclosed;
        }
        err
    }

    fn unclosed_set(&self, open: Token) -> ParseError {
        ParseError::new(
            ParseErrorKind::Unclosed,
            "unclosed set literal, expected '}'",
            TextRange::empty(self.eof_offset()),
        )
        .with_related(RelatedInfo::new(open.span, "set opened here"))
    }
}

/// Integral values become `Int`, everything else `Float`.
///
/// Digits without a fractional part must fit in `i64`. A literal with a
/// fractional part whose value is integral (`5.0`) is also an `Int` when it
/// fits; otherwise it stays a `Float`. Values too large for `f64` are rejected.
fn parse_number(text: &str) -> Option<Literal> {
    if !text.contains('.') {
        return text.parse::<i64>().ok().map(Literal::Int);
    }

    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(Literal::Int(value as i64))
    } else {
        Some(Literal::Float(value))
    }
}
