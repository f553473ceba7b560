//! Header storage shared by requests and responses.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A name → value header map.
///
/// Names are compared case-insensitively; the first-seen spelling of each
/// name is the one handed to the transport. Each name maps to a single
/// value; [`Header::add`] follows the HTTP multi-value convention and joins
/// repeated values with a comma.
#[derive(Debug, Default, Clone)]
pub struct Header {
    // Keyed by lower-cased name; the stored pair keeps the original
    // spelling for the wire.
    entries: HashMap<String, (String, String)>,
}

impl Header {
    /// Create an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, overwriting any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.entries.entry(name.to_ascii_lowercase()) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().1 = value.into();
            }
            Entry::Vacant(vacant) => {
                vacant.insert((name, value.into()));
            }
        }
    }

    /// Append a header value.
    ///
    /// If the name already exists, the new value is concatenated onto the
    /// existing one with a comma separator.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.entry(name.to_ascii_lowercase()) {
            Entry::Occupied(mut occupied) => {
                let existing = &mut occupied.get_mut().1;
                existing.push(',');
                existing.push_str(&value);
            }
            Entry::Vacant(vacant) => {
                vacant.insert((name, value));
            }
        }
    }

    /// Remove a header by name.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(&name.to_ascii_lowercase());
    }

    /// Iterate over all headers as (name, value) pairs, names in their
    /// first-seen spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
