//! Template data used to fill `${key}` placeholders in overlay presets.
//!
//! Entries keep their insertion order. Re-inserting an existing key replaces
//! the value in place, which is how user supplied `--data` entries override
//! the values derived from the probed metadata.

use crate::error::{CoreError, CoreResult};

/// Insertion-ordered key/value store for template substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserData {
    entries: Vec<(String, String)>,
}

impl UserData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Inserts every entry of `other`, in order, overriding existing keys.
    pub fn merge(&mut self, other: UserData) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Parses `KEY=VALUE` entries as given on the command line.
    ///
    /// Each entry must contain exactly one `=`.
    pub fn parse_entries<S: AsRef<str>>(entries: &[S]) -> CoreResult<Self> {
        let mut data = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let parts: Vec<&str> = entry.split('=').collect();
            if parts.len() != 2 {
                return Err(CoreError::BadDataEntry(entry.to_string()));
            }
            data.insert(parts[0], parts[1]);
        }
        Ok(data)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces every `${key}` occurrence in `text`, entry by entry.
    ///
    /// Placeholders without a matching entry are left as-is.
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (key, value) in &self.entries {
            let placeholder = format!("${{{key}}}");
            if result.contains(&placeholder) {
                result = result.replace(&placeholder, value);
            }
        }
        result
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UserData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}
