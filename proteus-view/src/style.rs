use serde::Deserialize;
use serde_json::Value;
use smartstring::{LazyCompact, SmartString};
use std::collections::HashMap;

type StyleName = SmartString<LazyCompact>;

/// Resolved presentation attributes attached to a node after layout resolution.
///
/// Keys are style names, values are the attribute objects the style collaborator
/// produced. The tree only stores and moves these; it never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Styles {
    entries: HashMap<StyleName, Value>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, attributes: Value) -> Option<Value> {
        self.entries.insert(StyleName::from(name), attributes)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Look up a single attribute inside a named style.
    pub fn attribute(&self, name: &str, attribute: &str) -> Option<&Value> {
        self.get(name)?.get(attribute)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}
