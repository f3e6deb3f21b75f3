//! Composite value payloads: symbols, host functions and opaque host objects.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Heap, Value};
use crate::errors::EvalResult;

// Symbol

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// Unique atom. Two symbols are equal only if they came from the same
/// `Symbol::new` call, whatever their descriptions.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Symbol {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}#{})", self.description, self.id)
    }
}

// FunctionValue

type HostFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// Host function carried as data.
///
/// The engine never calls these; they exist so that data can contain
/// functions and the `func` predicate can recognize them.
#[derive(Clone)]
pub struct FunctionValue {
    name: Arc<str>,
    func: Arc<HostFn>,
}

impl FunctionValue {
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }

    /// Functions compare by identity.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

// OpaqueValue

/// Host object of an arbitrary Rust type, matched with `instance_of::<T>()`.
#[derive(Clone)]
pub struct OpaqueValue {
    value: Heap<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub(super) fn new<T: Any + Send + Sync>(value: T) -> Self {
        let arc: Arc<dyn Any + Send + Sync> = Arc::new(value);
        OpaqueValue {
            value: Heap::from_arc(arc),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.value).is::<T>()
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name)
    }
}
