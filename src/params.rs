//! Per-target parameter sets.

use crate::error::{Error, Result};
use crate::placeholder;
use indexmap::IndexMap;

/// Ordered key/value pairs substituted into the skeleton and fragment bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: IndexMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any earlier value.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`ParameterSet::set`].
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every entry of `other` into this set.
    pub fn extend(&mut self, other: &ParameterSet) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Checks that every key is a valid placeholder name and that no value
    /// carries a placeholder delimiter of its own.
    ///
    /// # Errors
    /// * `Error::InvalidParameterError` naming `target` and the first bad key
    pub fn validate(&self, target: &str) -> Result<()> {
        for (key, value) in self.iter() {
            if !placeholder::is_valid_name(key) {
                return Err(Error::InvalidParameterError {
                    target: target.to_string(),
                    key: key.to_string(),
                    reason: "not a valid placeholder name".to_string(),
                });
            }
            if placeholder::contains_delimiter(value) {
                return Err(Error::InvalidParameterError {
                    target: target.to_string(),
                    key: key.to_string(),
                    reason: format!("value '{value}' contains a placeholder delimiter"),
                });
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
