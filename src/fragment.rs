//! Fragment library: named, write-once blocks of document text.
//! Bodies are opaque here; placeholders are resolved by the skeleton at
//! render time.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;

/// A reusable block of output-document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    name: String,
    body: String,
}

impl Fragment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Mapping from fragment name to fragment, in definition order.
#[derive(Debug, Default)]
pub struct FragmentLibrary {
    fragments: IndexMap<String, Fragment>,
}

impl FragmentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new fragment.
    ///
    /// # Errors
    /// * `Error::DuplicateFragmentDefinitionError` if `name` is already taken
    pub fn define<N, B>(&mut self, name: N, body: B) -> Result<&Fragment>
    where
        N: Into<String>,
        B: Into<String>,
    {
        let name = name.into();
        if self.fragments.contains_key(&name) {
            return Err(Error::DuplicateFragmentDefinitionError { name });
        }
        debug!("Defining fragment '{}'", name);
        let fragment = Fragment { name: name.clone(), body: body.into() };
        Ok(&*self.fragments.entry(name).or_insert(fragment))
    }

    /// Looks up a fragment by name on behalf of `target`.
    ///
    /// # Errors
    /// * `Error::FragmentNotFoundError` naming both the target and the fragment
    pub fn lookup(&self, target: &str, name: &str) -> Result<&Fragment> {
        self.fragments.get(name).ok_or_else(|| Error::FragmentNotFoundError {
            target: target.to_string(),
            fragment: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragment names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }
}
