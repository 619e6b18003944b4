//! Nested field lookup over managed-object JSON
//!
//! APIC responses wrap attributes at different depths depending on the class
//! (`imdata[].<class>.attributes.<field>`, children arrays, login envelopes).
//! Instead of hard-coding each path, callers search for a field name anywhere
//! in the tree.

use serde_json::Value;

use crate::error::ApicError;

/// Lazy depth-first search for every value stored under `key`.
///
/// Objects are walked in document order. A match is yielded before the walk
/// descends into the matched value, so nested duplicates come out after their
/// parent. Scalars at the root produce nothing.
pub struct FieldMatches<'a, 'k> {
    key: &'k str,
    stack: Vec<Frame<'a>>,
}

enum Frame<'a> {
    Object(serde_json::map::Iter<'a>),
    Array(std::slice::Iter<'a, Value>),
}

impl<'a> Frame<'a> {
    fn for_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Frame::Object(map.iter())),
            Value::Array(items) => Some(Frame::Array(items.iter())),
            _ => None,
        }
    }
}

impl<'a> Iterator for FieldMatches<'a, '_> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.stack.last_mut()? {
                Frame::Object(entries) => entries.next().map(|(k, v)| (Some(k.as_str()), v)),
                Frame::Array(items) => items.next().map(|v| (None, v)),
            };

            let Some((key, value)) = step else {
                self.stack.pop();
                continue;
            };

            if let Some(frame) = Frame::for_value(value) {
                self.stack.push(frame);
            }
            if key == Some(self.key) {
                return Some(value);
            }
        }
    }
}

/// Every occurrence of `key` under `root`, depth-first.
pub fn find_all<'a, 'k>(root: &'a Value, key: &'k str) -> FieldMatches<'a, 'k> {
    FieldMatches {
        key,
        stack: Frame::for_value(root).into_iter().collect(),
    }
}

/// First occurrence of `key` under `root`; the rest of the walk is dropped.
pub fn find_first<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    find_all(root, key).next()
}

/// First occurrence of `key` as a string, or `FieldNotFound`.
///
/// A non-string value under the key counts as missing.
pub fn require_str<'a>(root: &'a Value, key: &str, context: &str) -> Result<&'a str, ApicError> {
    find_first(root, key)
        .and_then(Value::as_str)
        .ok_or_else(|| ApicError::field_not_found(key, context.to_string()))
}
