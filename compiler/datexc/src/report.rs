//! Source-annotated diagnostics for parse and compile errors.

use ariadne::{Config, Label, Report, ReportKind, Source};
use datex_compile::CompileErrorKind;

use crate::Error;

/// Render `error` against the `source` it came from.
///
/// The output carries no color codes, so it can be compared in tests and
/// written to files.
pub fn render_error(source: &str, error: &Error) -> String {
    let span = error.span().to_range();
    // ariadne counts characters, spans count bytes.
    let chars = source.chars().count();
    let start = char_offset(source, span.start).min(chars.saturating_sub(1));
    let end = char_offset(source, span.end).clamp(start + 1, chars.max(start + 1));

    let mut report = Report::build(ReportKind::Error, (), start)
        .with_config(Config::default().with_color(false))
        .with_message(error);
    if start < chars {
        report = report.with_label(Label::new(start..end).with_message(label(error)));
    }

    let mut out = Vec::new();
    if report.finish().write(Source::from(source), &mut out).is_err() {
        return format!("error: {error}");
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn label(error: &Error) -> &'static str {
    let Error::Compile(err) = error else {
        return "here";
    };
    match err.kind {
        CompileErrorKind::BareIdentifier { .. } => "neither a key nor a string",
        CompileErrorKind::MissingInterpolation { .. } => "no item for this placeholder",
        CompileErrorKind::InvalidInterpolation { .. } => "interpolated item used here",
        CompileErrorKind::DuplicateRest => "second rest entry",
        CompileErrorKind::RestNotLast => "rest entry before the end",
        CompileErrorKind::InvalidLiteral { .. } => "literal used here",
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source.char_indices().take_while(|(i, _)| *i < byte).count()
}

#[cfg(test)]
mod tests;
