//! AQL: a filter query language for resume search.
//!
//! # Example
//!
//! ```
//! let query = aql_lib::translate_query("LOCATION = 'SF' AND YOE > 5").unwrap();
//! assert_eq!(
//!     query.sql,
//!     r#"SELECT "resumes".* FROM "resumes" WHERE "resumes"."location" = ? AND "resumes"."years_of_experience" > ?"#
//! );
//! assert_eq!(query.params.len(), 2);
//! ```
//!
//! Errors render against the query text:
//!
//! ```
//! let source = "SKILLS IN {'Python'";
//! let err = aql_lib::translate_query(source).unwrap_err();
//! eprintln!("{}", err.render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use serde::Serialize;

pub use aql_compiler::parser::{self, Literal};
pub use aql_compiler::{
    Backend, Bind, DiagnosticsPrinter, Error, ParsedQuery, QueryBuilder, Result, TranslateError,
    Translation, diagnostics, translate,
};
pub use aql_core::{ColumnRef, Field, Join, Table};
pub use aql_sql::{Placeholder, SqlBuilder, SqlConfig};

/// Rendered SQL plus the literals bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Literal>,
}

/// Translates filter text to SQL with default settings.
pub fn translate_query(source: &str) -> Result<SqlQuery> {
    translate_query_with(source, SqlConfig::default())
}

/// Translates filter text to SQL rendered with `config`.
pub fn translate_query_with(source: &str, config: SqlConfig) -> Result<SqlQuery> {
    let query = QueryBuilder::new(source).parse()?;
    let translation = query.translate(SqlBuilder::new(config))?;
    let sql = translation.render();
    log::debug!("{source:?} -> {sql}");
    Ok(SqlQuery {
        sql,
        params: translation.params,
    })
}
