//! SQL text backend for AQL.
//!
//! [`SqlBuilder`] implements the compiler's [`Backend`](aql_compiler::Backend)
//! trait. It selects from `resumes`, adds `LEFT JOIN`s as the translator
//! declares them and renders the filter with bound-parameter placeholders.
//!
//! ```
//! use aql_compiler::QueryBuilder;
//! use aql_sql::SqlBuilder;
//!
//! let query = QueryBuilder::new("YOE > 5").parse().unwrap();
//! let translation = query.translate(SqlBuilder::default()).unwrap();
//! assert_eq!(
//!     translation.render(),
//!     r#"SELECT "resumes".* FROM "resumes" WHERE "resumes"."years_of_experience" > ?"#
//! );
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod builder;
mod config;
pub mod sql_ast;

#[cfg(test)]
mod builder_tests;

pub use builder::SqlBuilder;
pub use config::{Placeholder, SqlConfig};
