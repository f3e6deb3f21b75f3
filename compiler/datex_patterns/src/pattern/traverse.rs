//! Traversal patterns: one level (`*`) and breadth-first descent (`**`).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::errors::EvalError;
use crate::matching::{empty, Match, Matches};
use crate::path::{set_path, with_index, with_key, Path, Step};
use crate::value::Value;

pub(super) fn spread(focus: &Value) -> Matches<'static> {
    match focus.resolved().into_owned() {
        Value::List(items) => Box::new((0..items.len()).map(move |i| {
            let items = items.clone();
            let child = items[i].clone();
            Ok(Match::new(child, move |new_value| {
                Ok(with_index(&items, i, new_value))
            }))
        })),
        Value::Map(object) => {
            let keys: Vec<String> = object.keys().map(str::to_owned).collect();
            Box::new(keys.into_iter().map(move |key| {
                let object = object.clone();
                let child = object.get(&key).cloned().unwrap_or_default();
                Ok(Match::new(child, move |new_value| {
                    Ok(with_key(&object, &key, new_value))
                }))
            }))
        }
        _ => empty(),
    }
}

/// Children of a node with the step leading to each, in `spread` order.
fn children(node: &Value) -> Vec<(Value, Step)> {
    match &*node.resolved() {
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| (child.clone(), Step::Index(i)))
            .collect(),
        Value::Map(object) => object
            .iter()
            .map(|(key, child)| (child.clone(), Step::Key(key.to_owned())))
            .collect(),
        _ => Vec::new(),
    }
}

/// Breadth-first walk yielding every node of a value, the root first.
///
/// Containers are counted by identity; once a container has been yielded
/// `max_visits` times, later encounters are skipped along with their
/// subtrees. This is what makes cyclic data (built with cells) terminate.
pub(super) struct Descend {
    root: Value,
    queue: VecDeque<(Value, Path)>,
    visits: FxHashMap<usize, usize>,
    max_visits: usize,
}

impl Descend {
    pub(super) fn new(root: Value, max_visits: usize) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((root.clone(), Path::new()));
        Descend {
            root,
            queue,
            visits: FxHashMap::default(),
            max_visits,
        }
    }

    /// Count a visit to `node`; false when it has been seen too often.
    fn admit(&mut self, node: &Value) -> bool {
        let Some(id) = node.identity() else {
            return self.max_visits > 0;
        };
        let seen = self.visits.entry(id).or_insert(0);
        if *seen >= self.max_visits {
            return false;
        }
        *seen += 1;
        true
    }
}

impl Iterator for Descend {
    type Item = Result<Match, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, path)) = self.queue.pop_front() {
            if !self.admit(&node) {
                tracing::trace!(depth = path.len(), "recursive descent skipping revisited node");
                continue;
            }
            for (child, step) in children(&node) {
                let mut child_path = path.clone();
                child_path.push(step);
                self.queue.push_back((child, child_path));
            }
            let root = self.root.clone();
            return Some(Ok(Match::new(node, move |new_value| {
                set_path(&root, &path, new_value)
            })));
        }
        None
    }
}
