//! Test utilities: backends that record or count the calls they receive.

use aql_core::{Field, Join};

use crate::translate::{Backend, Bind, TranslateError, translate};

/// Builds predicates as strings and logs each call, one line per call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<String>,
    pub filter: Option<String>,
}

impl RecordingBackend {
    fn compare(&mut self, name: &str, column: String, op: &str, value: Bind<'_>) -> String {
        self.calls.push(format!("{name} {column} ${}", value.index));
        format!("{column} {op} ${}", value.index)
    }
}

impl Backend for RecordingBackend {
    type Column = String;
    type Predicate = String;

    fn join(&mut self, join: Join) {
        self.calls.push(format!("join {}", join.name()));
    }

    fn column(&mut self, field: Field) -> String {
        self.calls.push(format!("column {field}"));
        field.column().to_string()
    }

    fn eq(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("eq", column, "=", value)
    }

    fn not_eq(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("not_eq", column, "!=", value)
    }

    fn gt(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("gt", column, ">", value)
    }

    fn lt(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("lt", column, "<", value)
    }

    fn gt_eq(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("gt_eq", column, ">=", value)
    }

    fn lt_eq(&mut self, column: String, value: Bind<'_>) -> String {
        self.compare("lt_eq", column, "<=", value)
    }

    fn is_in(&mut self, column: String, values: &[Bind<'_>]) -> String {
        let slots: Vec<String> = values.iter().map(|b| format!("${}", b.index)).collect();
        let slots = slots.join(", ");
        self.calls.push(format!("is_in {column} [{slots}]"));
        format!("{column} IN [{slots}]")
    }

    fn and(&mut self, left: String, right: String) -> String {
        self.calls.push("and".to_string());
        format!("({left} AND {right})")
    }

    fn or(&mut self, left: String, right: String) -> String {
        self.calls.push("or".to_string());
        format!("({left} OR {right})")
    }

    fn not(&mut self, inner: String) -> String {
        self.calls.push("not".to_string());
        format!("NOT {inner}")
    }

    fn filter(&mut self, predicate: String) {
        self.calls.push("filter".to_string());
        self.filter = Some(predicate);
    }

    fn render(&self) -> String {
        self.filter.clone().unwrap_or_default()
    }
}

/// Counts calls and tracks each predicate as the number of comparisons it
/// covers. Cheap enough for very long queries.
#[derive(Debug, Default)]
pub struct CountingBackend {
    pub joins: usize,
    pub columns: usize,
    pub combined: usize,
    pub negated: usize,
    pub filtered: Option<usize>,
}

impl Backend for CountingBackend {
    type Column = Field;
    type Predicate = usize;

    fn join(&mut self, _join: Join) {
        self.joins += 1;
    }

    fn column(&mut self, field: Field) -> Field {
        self.columns += 1;
        field
    }

    fn eq(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn not_eq(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn gt(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn lt(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn gt_eq(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn lt_eq(&mut self, _column: Field, _value: Bind<'_>) -> usize {
        1
    }

    fn is_in(&mut self, _column: Field, _values: &[Bind<'_>]) -> usize {
        1
    }

    fn and(&mut self, left: usize, right: usize) -> usize {
        self.combined += 1;
        left + right
    }

    fn or(&mut self, left: usize, right: usize) -> usize {
        self.combined += 1;
        left + right
    }

    fn not(&mut self, inner: usize) -> usize {
        self.negated += 1;
        inner
    }

    fn filter(&mut self, predicate: usize) {
        self.filtered = Some(predicate);
    }

    fn render(&self) -> String {
        format!("{} comparison(s)", self.filtered.unwrap_or_default())
    }
}

/// `count` copies of `condition` joined by `op`.
pub fn chain(condition: &str, op: &str, count: usize) -> String {
    vec![condition; count].join(&format!(" {op} "))
}

/// Parses and translates `source`, dumping calls, filter and parameters.
pub fn record(source: &str) -> Result<String, TranslateError> {
    let query = crate::parser::parse(source).expect("test query should parse");
    let translation = translate(&query, RecordingBackend::default())?;

    let mut out = String::new();
    for call in &translation.backend.calls {
        out.push_str(call);
        out.push('\n');
    }
    out.push_str(&format!("where: {}\n", translation.render()));
    let params: Vec<String> = translation.params.iter().map(|p| p.to_string()).collect();
    out.push_str(&format!("params: [{}]\n", params.join(", ")));
    Ok(out)
}
