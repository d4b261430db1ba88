//! The labeling result: an insertion-ordered map of result keys to labels.

use crate::family::{PersonId, UnionId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Key of one labeling entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResultKey {
    /// A resolved individual.
    Person(PersonId),

    /// The spouse of `person` in `union` could not be determined.
    UnresolvedSpouse { person: PersonId, union: UnionId },

    /// Child slot `slot` (0-based, source order after sorting) of `union`
    /// is empty.
    MissingChild { union: UnionId, slot: usize },
}

impl ResultKey {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Person(_) => EntryKind::Person,
            Self::UnresolvedSpouse { .. } => EntryKind::UnresolvedSpouse,
            Self::MissingChild { .. } => EntryKind::MissingChild,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Person(_))
    }

    pub fn person(&self) -> Option<&PersonId> {
        match self {
            Self::Person(person) | Self::UnresolvedSpouse { person, .. } => Some(person),
            Self::MissingChild { .. } => None,
        }
    }

    pub fn union(&self) -> Option<&UnionId> {
        match self {
            Self::Person(_) => None,
            Self::UnresolvedSpouse { union, .. } | Self::MissingChild { union, .. } => Some(union),
        }
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(person) => write!(f, "{person}"),
            Self::UnresolvedSpouse { person, union } => {
                write!(f, "SPOUSE-NULL-{person}-{union}")
            }
            Self::MissingChild { union, slot } => write!(f, "CHILD-NULL-{union}-{slot}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Person,
    UnresolvedSpouse,
    MissingChild,
}

/// Display name and label of one entry. Synthetic entries have no name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub name: Option<String>,
    pub label: String,
}

/// Labels in traversal order.
///
/// Re-inserting a key replaces its entry but keeps the original position,
/// so exports stay deterministic when a person is reached twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelingResult {
    entries: Vec<(ResultKey, LabelEntry)>,
    index: HashMap<ResultKey, usize>,
}

impl LabelingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Returns the previous entry, if any.
    pub fn insert(&mut self, key: ResultKey, entry: LabelEntry) -> Option<LabelEntry> {
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, entry));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry));
        None
    }

    pub fn get(&self, key: &ResultKey) -> Option<&LabelEntry> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Label of a resolved individual.
    pub fn label_of(&self, person: &PersonId) -> Option<&str> {
        self.get(&ResultKey::Person(person.clone()))
            .map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, &LabelEntry)> {
        self.entries.iter().map(|(key, entry)| (key, entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResultKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Entries standing in for unresolvable people.
    pub fn synthetic(&self) -> impl Iterator<Item = (&ResultKey, &LabelEntry)> {
        self.iter().filter(|(key, _)| key.is_synthetic())
    }
}
