//! Persistent data values matched and rebuilt by patterns.
//!
//! # Sharing
//!
//! Containers are stored behind `Heap<T>`, an `Arc` wrapper whose
//! constructor is private to this module. All allocations go through
//! factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");           // OK
//! let xs = Value::list(vec![Value::int(1)]); // OK
//! let bad = Value::List(Heap::new(...));     // ERROR: Heap::new is pub(super)
//! ```
//!
//! Updates never mutate a value in place: replacing a field clones the
//! containing `Vec`/`Object` and shares every untouched child.
//!
//! # Cells
//!
//! `Value::Cell` is the only interior-mutable node. It exists so callers
//! can build cyclic graphs. Reads see through a cell (`resolved`); writes
//! performed by patterns produce plain containers and never touch the cell.

mod composite;
mod heap;
mod object;

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

pub use composite::{FunctionValue, OpaqueValue, Symbol};
pub use heap::Heap;
pub use object::Object;

use crate::errors::{type_mismatch, EvalError, EvalResult};

/// Data value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value: a missing optional key, or list filler.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    Symbol(Symbol),
    Date(DateTime<Utc>),
    List(Heap<Vec<Value>>),
    /// String-keyed mapping, insertion-ordered.
    Map(Heap<Object>),
    Function(FunctionValue),
    Opaque(OpaqueValue),
    /// Mutable indirection used to express cycles.
    Cell(Heap<RwLock<Value>>),
}

/// Coarse type of a value, as seen through cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    Symbol,
    Date,
    Array,
    Object,
    Function,
    Opaque,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Undefined => "undefined",
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Symbol => "symbol",
            ValueType::Date => "date",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Function => "function",
            ValueType::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Factories

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value from an `Object`.
    #[inline]
    pub fn object(object: Object) -> Self {
        Value::Map(Heap::new(object))
    }

    /// Create a map value from key/value pairs, keeping their order.
    ///
    /// ```text
    /// let point = Value::map([("x", Value::int(1)), ("y", Value::int(2))]);
    /// ```
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::object(entries.into_iter().collect())
    }

    /// Create a fresh symbol; it is equal only to itself.
    pub fn symbol(description: &str) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    #[inline]
    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(instant)
    }

    pub fn function(
        name: &str,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Value::Function(FunctionValue::new(name, func))
    }

    /// Wrap an arbitrary host object.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }

    /// Create a mutable cell holding `initial`.
    pub fn cell(initial: Value) -> Self {
        Value::Cell(Heap::new(RwLock::new(initial)))
    }
}

// Cells

impl Value {
    /// Overwrite the contents of a cell.
    pub fn set_cell(&self, value: Value) -> Result<(), EvalError> {
        match self {
            Value::Cell(cell) => {
                *cell.write() = value;
                Ok(())
            }
            other => Err(type_mismatch("cell", other.type_name())),
        }
    }

    /// The value with any cells read through.
    ///
    /// Borrowed for everything but cells, so the common case is free.
    pub fn resolved(&self) -> Cow<'_, Value> {
        let Value::Cell(cell) = self else {
            return Cow::Borrowed(self);
        };
        let mut current = cell.read().clone();
        // A cell pointing at itself would loop forever; cap the chain.
        for _ in 0..64 {
            let next = match &current {
                Value::Cell(inner) => inner.read().clone(),
                _ => break,
            };
            current = next;
        }
        Cow::Owned(current)
    }
}

// Accessors

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Float`.
    #[expect(clippy::cast_precision_loss, reason = "numbers compare as doubles")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Map(object) => Some(&**object),
            _ => None,
        }
    }

    /// Borrow an opaque host object as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(opaque) => opaque.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// `Undefined` or `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Type as seen through cells.
    pub fn type_of(&self) -> ValueType {
        match &*self.resolved() {
            Value::Undefined => ValueType::Undefined,
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) | Value::Float(_) => ValueType::Number,
            Value::Str(_) => ValueType::String,
            Value::Symbol(_) => ValueType::Symbol,
            Value::Date(_) => ValueType::Date,
            Value::List(_) => ValueType::Array,
            Value::Map(_) => ValueType::Object,
            Value::Function(_) => ValueType::Function,
            Value::Opaque(_) => ValueType::Opaque,
            // `resolved` caps self-referential cell chains.
            Value::Cell(_) => ValueType::Undefined,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_of().name()
    }

    /// Identity of a container node (its heap address); scalars have none.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(Heap::addr(items)),
            Value::Map(object) => Some(Heap::addr(object)),
            Value::Cell(cell) => Some(Heap::addr(cell)),
            _ => None,
        }
    }

    /// Text used when a scalar is spliced into a string.
    pub fn display_value(&self) -> Option<String> {
        match &*self.resolved() {
            Value::Str(s) => Some(s.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &***s),
            Value::Symbol(sym) => write!(f, "{sym:?}"),
            Value::Date(d) => write!(f, "Date({})", d.to_rfc3339()),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(object) => write!(f, "Map({:?})", &**object),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::Opaque(opaque) => write!(f, "Opaque({opaque:?})"),
            Value::Cell(cell) => write!(f, "Cell({:#x})", Heap::addr(cell)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{:?}", &***s),
            Value::Symbol(sym) => write!(f, "Symbol({})", sym.description()),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(object) => {
                write!(f, "{{")?;
                for (i, (k, v)) in object.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Opaque(opaque) => write!(f, "{opaque:?}"),
            Value::Cell(cell) => write!(f, "<cell {:#x}>", Heap::addr(cell)),
        }
    }
}

/// Structural equality.
///
/// Maps ignore key order, `Int` and `Float` compare numerically, and
/// symbols, functions, opaque objects and cells compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
                self.as_f64() == other.as_f64()
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            (Value::Cell(a), Value::Cell(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::Date(instant)
    }
}
