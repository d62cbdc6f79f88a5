//! Rendering stage errors against the query text.
//!
//! Every error carries a source range. The printer turns it into an
//! annotate-snippets report: the message as title, a primary marker under the
//! range, and context markers for related locations such as the opening
//! brace of an unclosed set.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use crate::Error;


/// Builder for rendering one error with various options.
pub struct DiagnosticsPrinter<'e, 's> {
    error: &'e Error,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> DiagnosticsPrinter<'e, 's> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// Without a source only the error's `Display` form is written.
    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "{}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.error.message();
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(adjust_range(self.error.span(), source))
                .label(&message),
        );

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        if let Some(related) = self.error.related() {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.range, source))
                    .label(&related.message),
            );
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Zero-width ranges are widened to the character they sit on so the marker
/// is visible. At end of input there is nothing to cover.
fn adjust_range(range: TextRange, source: &str) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        let width = source
            .get(start..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        return start..start + width;
    }

    start..end
}

/// Plain rendering of `error` against `source`.
pub fn render(source: &str, error: &Error) -> String {
    DiagnosticsPrinter::new(error).source(source).render()
}
