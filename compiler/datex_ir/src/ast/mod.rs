//! Syntax tree for data expressions.
//!
//! The parser produces an `Expr`; the compiler walks it once and never
//! retains it. Nodes own their children (`Box`/`Vec`) because trees are
//! small and short-lived.
//!
//! `Display` renders a tree back into source text that parses to the same
//! tree (spans aside), inserting parentheses only where precedence requires.

use std::fmt;

use crate::Span;

/// An expression node with its source span.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Binding strength used when printing: 0 for alternation, 1 for
    /// sequence and its postfix operators, 2 for everything atomic.
    fn precedence(&self) -> u8 {
        match self.kind {
            ExprKind::Alt(..) => 0,
            ExprKind::Seq(..) | ExprKind::And(_) | ExprKind::Cut(_) => 1,
            _ => 2,
        }
    }

    /// Structural equality that ignores spans.
    pub fn same_shape(&self, other: &Expr) -> bool {
        self.kind.same_shape(&other.kind)
    }
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// `left | right`
    Alt(Box<Expr>, Box<Expr>),
    /// `left right`
    Seq(Box<Expr>, Box<Expr>),
    /// `expr &`
    And(Box<Expr>),
    /// `expr !`
    Cut(Box<Expr>),
    /// `{ key: expr, key?: expr, ...expr }`
    Object(Vec<ObjectEntry>),
    /// `[ expr, ...expr ]`
    Array(Vec<ArrayEntry>),
    /// `.key`, `."key"`, `.<n>`, optionally followed by `?`
    Key { key: Literal, optional: bool },
    /// `.3`, `.-1`, optionally followed by `?`
    Index { index: Literal, optional: bool },
    /// `.[from:to]` with either bound omitted
    Slice {
        from: Option<Literal>,
        to: Option<Literal>,
    },
    /// `*`
    Spread,
    /// `**`
    Recursive,
    /// `_`
    Id,
    /// A literal used as a whole pattern.
    Literal(Literal),
}

impl ExprKind {
    /// Node name, used in diagnostics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Alt(..) => "alternation",
            ExprKind::Seq(..) => "sequence",
            ExprKind::And(_) => "lookahead",
            ExprKind::Cut(_) => "cut",
            ExprKind::Object(_) => "object pattern",
            ExprKind::Array(_) => "array pattern",
            ExprKind::Key { .. } => "key",
            ExprKind::Index { .. } => "index",
            ExprKind::Slice { .. } => "slice",
            ExprKind::Spread => "spread",
            ExprKind::Recursive => "recursive descent",
            ExprKind::Id => "identity",
            ExprKind::Literal(_) => "literal",
        }
    }

    fn same_shape(&self, other: &ExprKind) -> bool {
        match (self, other) {
            (ExprKind::Alt(a1, b1), ExprKind::Alt(a2, b2))
            | (ExprKind::Seq(a1, b1), ExprKind::Seq(a2, b2)) => {
                a1.same_shape(a2) && b1.same_shape(b2)
            }
            (ExprKind::And(a), ExprKind::And(b)) | (ExprKind::Cut(a), ExprKind::Cut(b)) => {
                a.same_shape(b)
            }
            (ExprKind::Object(a), ExprKind::Object(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (ExprKind::Array(a), ExprKind::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            _ => self == other,
        }
    }
}

/// Literal leaves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Str(String),
    Int(i64),
    Ident(String),
    /// Index into the interpolated items.
    Placeholder(usize),
}

/// Entries of an object pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectEntry {
    Field {
        key: Literal,
        optional: bool,
        value: Expr,
    },
    Rest(Expr),
}

impl ObjectEntry {
    fn same_shape(&self, other: &ObjectEntry) -> bool {
        match (self, other) {
            (
                ObjectEntry::Field {
                    key: k1,
                    optional: o1,
                    value: v1,
                },
                ObjectEntry::Field {
                    key: k2,
                    optional: o2,
                    value: v2,
                },
            ) => k1 == k2 && o1 == o2 && v1.same_shape(v2),
            (ObjectEntry::Rest(a), ObjectEntry::Rest(b)) => a.same_shape(b),
            _ => false,
        }
    }
}

/// Entries of an array pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrayEntry {
    Item(Expr),
    Rest(Expr),
}

impl ArrayEntry {
    fn same_shape(&self, other: &ArrayEntry) -> bool {
        match (self, other) {
            (ArrayEntry::Item(a), ArrayEntry::Item(b))
            | (ArrayEntry::Rest(a), ArrayEntry::Rest(b)) => a.same_shape(b),
            _ => false,
        }
    }
}

// Printing

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// `...` followed by the rest pattern, spaced so that a leading `.` in the
/// pattern does not merge into the dot run.
fn write_rest(f: &mut fmt::Formatter<'_>, rest: &Expr) -> fmt::Result {
    let printed = rest.to_string();
    if printed.starts_with('.') {
        write!(f, "... {printed}")
    } else {
        write!(f, "...{printed}")
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min_precedence: u8) -> fmt::Result {
    if expr.precedence() < min_precedence {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write_quoted(f, s),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Ident(name) if is_identifier(name) => f.write_str(name),
            Literal::Ident(name) => write_quoted(f, name),
            Literal::Placeholder(i) => write!(f, "<{i}>"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Alt(left, right) => {
                write_operand(f, left, 0)?;
                f.write_str(" | ")?;
                write_operand(f, right, 1)
            }
            ExprKind::Seq(left, right) => {
                write_operand(f, left, 1)?;
                f.write_str(" ")?;
                write_operand(f, right, 2)
            }
            ExprKind::And(inner) => {
                write_operand(f, inner, 1)?;
                f.write_str(" &")
            }
            ExprKind::Cut(inner) => {
                write_operand(f, inner, 1)?;
                f.write_str(" !")
            }
            ExprKind::Object(entries) => {
                f.write_str("{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match entry {
                        ObjectEntry::Field {
                            key,
                            optional,
                            value,
                        } => {
                            write!(f, "{key}{}: {value}", if *optional { "?" } else { "" })?;
                        }
                        ObjectEntry::Rest(rest) => write_rest(f, rest)?,
                    }
                }
                f.write_str("}")
            }
            ExprKind::Array(entries) => {
                f.write_str("[")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match entry {
                        ArrayEntry::Item(item) => write!(f, "{item}")?,
                        ArrayEntry::Rest(rest) => write_rest(f, rest)?,
                    }
                }
                f.write_str("]")
            }
            ExprKind::Key { key, optional } | ExprKind::Index { index: key, optional } => {
                write!(f, ".{key}{}", if *optional { "?" } else { "" })
            }
            ExprKind::Slice { from, to } => {
                f.write_str(".[")?;
                if let Some(from) = from {
                    write!(f, "{from}")?;
                }
                f.write_str(":")?;
                if let Some(to) = to {
                    write!(f, "{to}")?;
                }
                f.write_str("]")
            }
            ExprKind::Spread => f.write_str("*"),
            ExprKind::Recursive => f.write_str("**"),
            ExprKind::Id => f.write_str("_"),
            ExprKind::Literal(lit) => write!(f, "{lit}"),
        }
    }
}
