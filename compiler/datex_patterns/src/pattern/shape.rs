//! Structural patterns over whole objects and arrays.

use crate::errors::{arity_mismatch, type_mismatch, EvalError};
use crate::matching::{empty, failed, once, Match, Matches};
use crate::value::{Object, Value};

use super::Pattern;

/// A named field of an object pattern.
#[derive(Clone, Debug)]
pub struct FieldPattern {
    pub key: String,
    pub pattern: Pattern,
    pub optional: bool,
}

impl FieldPattern {
    pub fn new(key: impl Into<String>, pattern: Pattern) -> Self {
        FieldPattern {
            key: key.into(),
            pattern,
            optional: false,
        }
    }

    pub fn optional(key: impl Into<String>, pattern: Pattern) -> Self {
        FieldPattern {
            optional: true,
            ..FieldPattern::new(key, pattern)
        }
    }
}

/// `{ key: pattern, key?: pattern, ...rest }`
#[derive(Clone, Debug, Default)]
pub struct ObjectShape {
    pub fields: Vec<FieldPattern>,
    pub rest: Option<Box<Pattern>>,
}

/// `[ pattern, ..., ...rest ]`
#[derive(Clone, Debug, Default)]
pub struct ArrayShape {
    pub items: Vec<Pattern>,
    pub rest: Option<Box<Pattern>>,
}

type Combinations<'p> = Box<dyn Iterator<Item = Result<Vec<Match>, EvalError>> + 'p>;

/// Cartesian product of the matches at each position, leftmost slowest.
fn product<'p>(positions: Vec<(&'p Pattern, Value)>) -> Combinations<'p> {
    let start: Combinations<'p> = Box::new(std::iter::once(Ok(Vec::new())));
    positions.into_iter().fold(start, |acc, (pattern, value)| {
        Box::new(acc.flat_map(move |partial| -> Combinations<'p> {
            match partial {
                Ok(partial) => Box::new(pattern.matches(value.clone()).map(move |found| {
                    found.map(|found| {
                        let mut next = partial.clone();
                        next.push(found);
                        next
                    })
                })),
                Err(err) => Box::new(std::iter::once(Err(err))),
            }
        }))
    })
}

// Objects

/// Entries of `object` whose keys are not in `named`.
fn leftover(object: &Object, named: &[String]) -> Object {
    object
        .iter()
        .filter(|(key, _)| !named.iter().any(|name| name == key))
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

impl ObjectShape {
    fn named(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.key.clone()).collect()
    }

    pub(super) fn matches(&self, focus: &Value) -> Matches<'_> {
        let Value::Map(object) = focus.resolved().into_owned() else {
            return empty();
        };

        let mut present: Vec<(&FieldPattern, Value)> = Vec::with_capacity(self.fields.len());
        let mut skipped = Vec::new();
        for field in &self.fields {
            match object.get(&field.key) {
                Some(value) => present.push((field, value.clone())),
                None if field.optional => skipped.push(field.key.clone()),
                None => return empty(),
            }
        }

        let named = self.named();
        let keys: Vec<String> = present.iter().map(|(field, _)| field.key.clone()).collect();
        let mut positions: Vec<(&Pattern, Value)> = present
            .into_iter()
            .map(|(field, value)| (&field.pattern, value))
            .collect();
        if let Some(rest) = &self.rest {
            positions.push((&**rest, Value::object(leftover(&object, &named))));
        }

        let has_rest = self.rest.is_some();
        Box::new(product(positions).map(move |combination| -> Result<Match, EvalError> {
            let fields = FieldMatches {
                object: (*object).clone(),
                named: named.clone(),
                keys: keys.clone(),
                skipped: skipped.clone(),
            };
            Ok(fields.assemble(combination?, has_rest))
        }))
    }
}

/// What one object match needs to rebuild its focus.
struct FieldMatches {
    object: Object,
    named: Vec<String>,
    /// Keys of the fields that matched, in field order.
    keys: Vec<String>,
    /// Optional keys that were absent from the focus.
    skipped: Vec<String>,
}

impl FieldMatches {
    fn assemble(self, mut combination: Vec<Match>, has_rest: bool) -> Match {
        // A rest match that is not an object cannot be merged into the
        // matched object; its part of the focus is then left alone on replace.
        let rest_match = has_rest
            .then(|| combination.pop())
            .flatten()
            .filter(|m| m.value.resolved().as_object().is_some());

        let mut found: Object = self
            .keys
            .iter()
            .zip(&combination)
            .map(|(key, m)| (key.as_str(), m.value.clone()))
            .collect();
        if let Some(rest) = &rest_match {
            if let Some(entries) = rest.value.resolved().as_object() {
                found.extend(entries.iter().map(|(k, v)| (k, v.clone())));
            }
        }

        Match::new(Value::object(found), move |new_value| {
            let Some(replacement) = new_value.resolved().as_object().cloned() else {
                return Err(type_mismatch("object", new_value.type_name()));
            };
            let mut result = self.object.clone();
            for (key, m) in self.keys.iter().zip(&combination) {
                let field = m.replace(replacement.get(key).cloned().unwrap_or_default())?;
                if matches!(field, Value::Undefined) {
                    result.remove(key);
                } else {
                    result.insert(key.as_str(), field);
                }
            }
            for key in &self.skipped {
                match replacement.get(key) {
                    Some(Value::Undefined) | None => {}
                    Some(value) => {
                        result.insert(key.as_str(), value.clone());
                    }
                }
            }
            if let Some(rest) = &rest_match {
                let rebuilt = rest.replace(Value::object(leftover(&replacement, &self.named)))?;
                let Some(rebuilt) = rebuilt.resolved().as_object().cloned() else {
                    return Err(type_mismatch("object", rebuilt.type_name()));
                };
                for key in leftover(&self.object, &self.named).keys() {
                    if !rebuilt.contains_key(key) {
                        result.remove(key);
                    }
                }
                result.extend(rebuilt.iter().map(|(k, v)| (k, v.clone())));
            }
            Ok(Value::object(result))
        })
    }
}

// Arrays

impl ArrayShape {
    pub(super) fn matches(&self, focus: &Value) -> Matches<'_> {
        let Value::List(items) = focus.resolved().into_owned() else {
            return empty();
        };
        let fixed = self.items.len();
        let arity_ok = match self.rest {
            Some(_) => items.len() >= fixed,
            None => items.len() == fixed,
        };
        if !arity_ok {
            return empty();
        }

        let mut positions: Vec<(&Pattern, Value)> = self
            .items
            .iter()
            .zip(items.iter().cloned())
            .collect();
        if let Some(rest) = &self.rest {
            positions.extend(items[fixed..].iter().map(|item| (&**rest, item.clone())));
        }

        let len = items.len();
        Box::new(product(positions).map(move |combination| -> Result<Match, EvalError> {
            let combination = combination?;
            let found = Value::list(combination.iter().map(|m| m.value.clone()).collect());
            Ok(Match::new(found, move |new_value| {
                let Some(replacement) = new_value.resolved().as_list().map(<[Value]>::to_vec) else {
                    return Err(type_mismatch("array", new_value.type_name()));
                };
                if replacement.len() < fixed {
                    return Err(arity_mismatch(fixed, replacement.len()));
                }
                let mut result = Vec::with_capacity(replacement.len());
                for (i, item) in replacement.into_iter().enumerate() {
                    if i < len {
                        result.push(combination[i].replace(item)?);
                    } else {
                        result.push(item);
                    }
                }
                Ok(Value::list(result))
            }))
        }))
    }
}

/// Yield the whole list when every element matches `inner`.
pub(super) fn array_of<'p>(inner: &'p Pattern, focus: &Value) -> Matches<'p> {
    let Some(items) = focus.resolved().as_list().map(<[Value]>::to_vec) else {
        return empty();
    };
    for item in &items {
        match inner.matches(item.clone()).next() {
            Some(Ok(_)) => {}
            Some(Err(err)) => return failed(err),
            None => return empty(),
        }
    }
    once(Match::whole(focus.clone()))
}
