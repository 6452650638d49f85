//! Read-only in-memory user store

use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
}

impl UserRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Ordered, immutable user collection keyed by string id.
///
/// Entries keep their insertion order for every read, which pagination
/// depends on. The backing data is shared behind an `Arc`, so clones are
/// cheap and concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct UserStore {
    entries: Arc<Vec<(String, UserRecord)>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::from_entries(["john", "jane", "bob"].map(|id| (id.to_string(), UserRecord::new(id))))
    }

    /// Builds a store from `(id, record)` pairs. A repeated id keeps its first
    /// position and takes the later record.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, UserRecord)>,
    {
        let mut ordered: Vec<(String, UserRecord)> = Vec::new();
        for (id, record) in entries {
            match ordered.iter_mut().find(|(existing, _)| *existing == id) {
                Some(slot) => slot.1 = record,
                None => ordered.push((id, record)),
            }
        }

        Self {
            entries: Arc::new(ordered),
        }
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record)
    }

    pub fn records(&self) -> Vec<UserRecord> {
        self.entries.iter().map(|(_, record)| record.clone()).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
