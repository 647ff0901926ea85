//! Field slots holding the short values users drag into the document.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub index: usize,
    pub value: String,
}

/// A fixed number of field slots. Updates return a new set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    values: Vec<String>,
}

impl FieldSet {
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![String::new(); count],
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// `None` when `index` is not a slot.
    pub fn with_value(&self, index: usize, value: impl Into<String>) -> Option<FieldSet> {
        if index >= self.values.len() {
            return None;
        }
        let mut values = self.values.clone();
        values[index] = value.into();
        Some(Self { values })
    }

    /// Moves the value at `from` to `to`, shifting the slots in between.
    pub fn with_moved(&self, from: usize, to: usize) -> Option<FieldSet> {
        if from >= self.values.len() || to >= self.values.len() {
            return None;
        }
        let mut values = self.values.clone();
        let moved = values.remove(from);
        values.insert(to, moved);
        Some(Self { values })
    }

    pub fn entries(&self) -> Vec<FieldEntry> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| FieldEntry {
                index,
                value: value.clone(),
            })
            .collect()
    }
}

/// First `max` chars of `value`.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
