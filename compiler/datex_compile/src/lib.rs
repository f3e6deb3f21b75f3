//! `DatEx` Compile - turns data-expression syntax trees into patterns.
//!
//! The compiler is a single walk over `datex_ir::Expr`. Placeholders are
//! resolved against the interpolated items as they are reached, and every
//! error is reported before any matching happens.
//!
//! | Syntax | Pattern |
//! |---|---|
//! | `a \| b` | `alt` (nested alternatives flattened) |
//! | `a b` | `seq` (nested sequences flattened) |
//! | `a &` / `a !` | `and` / `limit(a, 1)` |
//! | `.key` `.3` `.[a:b]` | `key` / `index` / `slice` |
//! | `*` `**` `_` | `spread` / `recursive` / `id` |
//! | `{..}` `[..]` | `object_shape` / `array_shape` |
//! | `"s"` `3` `<n>` | `value`, or the interpolated item |

mod error;
mod interpolation;

pub use error::{CompileError, CompileErrorKind};
pub use interpolation::Interpolation;

use datex_ir::{ArrayEntry, Expr, ExprKind, Literal, ObjectEntry, Span};
use datex_patterns::{FieldPattern, Pattern, Value};

/// Compile `expr`, resolving `<n>` placeholders against `items`.
pub fn compile(expr: &Expr, items: &[Interpolation]) -> Result<Pattern, CompileError> {
    let pattern = Compiler { items }.compile_expr(expr)?;
    tracing::debug!(expr = %expr, pattern = %pattern, "compiled data expression");
    Ok(pattern)
}

/// A key access resolves to one of these once placeholders are known.
enum Access {
    Key(String),
    Index(i64),
}

struct Compiler<'a> {
    items: &'a [Interpolation],
}

impl Compiler<'_> {
    fn compile_expr(&self, expr: &Expr) -> Result<Pattern, CompileError> {
        match &expr.kind {
            ExprKind::Alt(..) => {
                let mut branches = Vec::new();
                flatten(expr, &mut branches, |kind| match kind {
                    ExprKind::Alt(left, right) => Some((left.as_ref(), right.as_ref())),
                    _ => None,
                });
                let branches = branches
                    .into_iter()
                    .map(|branch| self.compile_expr(branch))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Pattern::Alt(branches))
            }
            ExprKind::Seq(..) => {
                let mut steps = Vec::new();
                flatten(expr, &mut steps, |kind| match kind {
                    ExprKind::Seq(left, right) => Some((left.as_ref(), right.as_ref())),
                    _ => None,
                });
                let steps = steps
                    .into_iter()
                    .map(|step| self.compile_expr(step))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Pattern::Seq(steps))
            }
            ExprKind::And(inner) => Ok(Pattern::and(self.compile_expr(inner)?)),
            ExprKind::Cut(inner) => Ok(Pattern::cut(self.compile_expr(inner)?)),
            ExprKind::Object(entries) => self.compile_object(entries),
            ExprKind::Array(entries) => self.compile_array(entries),
            ExprKind::Key { key, optional } => {
                let access = match key {
                    Literal::Ident(name) | Literal::Str(name) => Access::Key(name.clone()),
                    Literal::Placeholder(index) => self.access(*index, expr.span)?,
                    Literal::Int(_) => {
                        return Err(invalid_literal(key, "a key", expr.span));
                    }
                };
                Ok(access_pattern(access, *optional))
            }
            ExprKind::Index { index, optional } => {
                let index = self.integer(index, "an index", expr.span)?;
                Ok(access_pattern(Access::Index(index), *optional))
            }
            ExprKind::Slice { from, to } => {
                let start = from
                    .as_ref()
                    .map(|bound| self.integer(bound, "a slice bound", expr.span))
                    .transpose()?;
                let end = to
                    .as_ref()
                    .map(|bound| self.integer(bound, "a slice bound", expr.span))
                    .transpose()?;
                Ok(Pattern::slice(start, end))
            }
            ExprKind::Spread => Ok(Pattern::spread()),
            ExprKind::Recursive => Ok(Pattern::recursive()),
            ExprKind::Id => Ok(Pattern::id()),
            ExprKind::Literal(literal) => self.compile_literal(literal, expr.span),
        }
    }

    fn compile_literal(&self, literal: &Literal, span: Span) -> Result<Pattern, CompileError> {
        match literal {
            Literal::Str(s) => Ok(Pattern::value(s.as_str())),
            Literal::Int(n) => Ok(Pattern::value(*n)),
            Literal::Ident(name) => Err(CompileError::new(
                CompileErrorKind::BareIdentifier { name: name.clone() },
                span,
            )),
            Literal::Placeholder(index) => Ok(match self.item(*index, span)? {
                Interpolation::Value(value) => Pattern::Value(value.clone()),
                Interpolation::Predicate(predicate) => Pattern::where_(predicate.clone()),
                Interpolation::Regex(regex) => Pattern::regex(regex.clone()),
                Interpolation::Pattern(pattern) => pattern.clone(),
            }),
        }
    }

    fn compile_object(&self, entries: &[ObjectEntry]) -> Result<Pattern, CompileError> {
        let mut fields = Vec::with_capacity(entries.len());
        let mut rest = None;
        for entry in entries {
            match entry {
                ObjectEntry::Field {
                    key,
                    optional,
                    value,
                } => {
                    let key = self.object_key(key, value.span)?;
                    let pattern = self.compile_expr(value)?;
                    fields.push(if *optional {
                        FieldPattern::optional(key, pattern)
                    } else {
                        FieldPattern::new(key, pattern)
                    });
                }
                ObjectEntry::Rest(pattern) => {
                    if rest.is_some() {
                        return Err(CompileError::new(
                            CompileErrorKind::DuplicateRest,
                            pattern.span,
                        ));
                    }
                    rest = Some(self.compile_expr(pattern)?);
                }
            }
        }
        Ok(Pattern::object_shape(fields, rest))
    }

    fn compile_array(&self, entries: &[ArrayEntry]) -> Result<Pattern, CompileError> {
        let mut items = Vec::with_capacity(entries.len());
        let mut rest = None;
        for (position, entry) in entries.iter().enumerate() {
            match entry {
                ArrayEntry::Item(item) => items.push(self.compile_expr(item)?),
                ArrayEntry::Rest(pattern) => {
                    if position + 1 != entries.len() {
                        return Err(CompileError::new(CompileErrorKind::RestNotLast, pattern.span));
                    }
                    rest = Some(self.compile_expr(pattern)?);
                }
            }
        }
        Ok(Pattern::array_shape(items, rest))
    }

    // Placeholders

    fn item(&self, index: usize, span: Span) -> Result<&Interpolation, CompileError> {
        self.items.get(index).ok_or_else(|| {
            CompileError::new(
                CompileErrorKind::MissingInterpolation {
                    index,
                    supplied: self.items.len(),
                },
                span,
            )
        })
    }

    /// `.<n>`: a string item is a key, an integer item an index.
    fn access(&self, index: usize, span: Span) -> Result<Access, CompileError> {
        match self.item(index, span)? {
            Interpolation::Value(Value::Str(s)) => Ok(Access::Key(s.to_string())),
            Interpolation::Value(Value::Int(n)) => Ok(Access::Index(*n)),
            other => Err(invalid_interpolation(index, other, "a key", span)),
        }
    }

    fn object_key(&self, key: &Literal, span: Span) -> Result<String, CompileError> {
        match key {
            Literal::Ident(name) | Literal::Str(name) => Ok(name.clone()),
            Literal::Int(n) => Ok(n.to_string()),
            Literal::Placeholder(index) => match self.item(*index, span)? {
                Interpolation::Value(Value::Str(s)) => Ok(s.to_string()),
                Interpolation::Value(Value::Int(n)) => Ok(n.to_string()),
                other => Err(invalid_interpolation(*index, other, "an object key", span)),
            },
        }
    }

    fn integer(
        &self,
        literal: &Literal,
        position: &'static str,
        span: Span,
    ) -> Result<i64, CompileError> {
        match literal {
            Literal::Int(n) => Ok(*n),
            Literal::Placeholder(index) => match self.item(*index, span)? {
                Interpolation::Value(Value::Int(n)) => Ok(*n),
                other => Err(invalid_interpolation(*index, other, position, span)),
            },
            Literal::Str(_) | Literal::Ident(_) => Err(invalid_literal(literal, position, span)),
        }
    }
}

/// Collect the operands of a left-nested chain of one binary operator.
fn flatten<'e>(
    expr: &'e Expr,
    out: &mut Vec<&'e Expr>,
    split: fn(&'e ExprKind) -> Option<(&'e Expr, &'e Expr)>,
) {
    match split(&expr.kind) {
        Some((left, right)) => {
            flatten(left, out, split);
            flatten(right, out, split);
        }
        None => out.push(expr),
    }
}

fn access_pattern(access: Access, optional: bool) -> Pattern {
    match (access, optional) {
        (Access::Key(name), false) => Pattern::key(name),
        (Access::Key(name), true) => Pattern::optional_key(name),
        (Access::Index(index), false) => Pattern::index(index),
        (Access::Index(index), true) => Pattern::optional_index(index),
    }
}

fn invalid_interpolation(
    index: usize,
    found: &Interpolation,
    position: &'static str,
    span: Span,
) -> CompileError {
    CompileError::new(
        CompileErrorKind::InvalidInterpolation {
            index,
            found: found.describe(),
            position,
        },
        span,
    )
}

fn invalid_literal(literal: &Literal, position: &'static str, span: Span) -> CompileError {
    let found = match literal {
        Literal::Str(_) => "string",
        Literal::Int(_) => "integer",
        Literal::Ident(_) => "identifier",
        Literal::Placeholder(_) => "placeholder",
    };
    CompileError::new(CompileErrorKind::InvalidLiteral { found, position }, span)
}

#[cfg(test)]
mod tests;
