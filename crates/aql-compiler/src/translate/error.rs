use aql_core::Field;
use rowan::TextRange;

use crate::parser::CompareOp;

/// Semantic problems found while lowering a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unknown field `{name}`")]
    UnknownField { name: String, span: TextRange },

    #[error("`IN` on field `{field}` requires a set literal")]
    ScalarWithIn { field: Field, span: TextRange },

    #[error("operator `{op}` on field `{field}` requires a single value, found a set")]
    SetWithScalarOperator {
        field: Field,
        op: CompareOp,
        span: TextRange,
    },
}

impl TranslateError {
    /// Source range of the offending field name or operand.
    pub fn span(&self) -> TextRange {
        match self {
            TranslateError::UnknownField { span, .. }
            | TranslateError::ScalarWithIn { span, .. }
            | TranslateError::SetWithScalarOperator { span, .. } => *span,
        }
    }
}
