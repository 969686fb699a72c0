//! The shared document skeleton: literal text interleaved with named
//! insertion points.

use crate::error::{Error, Result};
use crate::fragment::FragmentLibrary;
use crate::placeholder;
use crate::target::Target;
use indexmap::IndexSet;
use log::debug;

/// One piece of the skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Emitted verbatim.
    Literal(String),
    /// Replaced by the parameter with this key.
    Param(String),
    /// Replaced by the selected fragments, in selection order.
    Slot(String),
}

/// Fixed document structure shared by every target.
#[derive(Debug, Clone)]
pub struct Skeleton {
    segments: Vec<Segment>,
    slots: IndexSet<String>,
}

/// Incrementally assembles a [`Skeleton`].
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    segments: Vec<Segment>,
    slots: IndexSet<String>,
    duplicate: Option<String>,
}

impl SkeletonBuilder {
    pub fn literal<S: Into<String>>(mut self, text: S) -> Self {
        self.segments.push(Segment::Literal(text.into()));
        self
    }

    pub fn param<S: Into<String>>(mut self, key: S) -> Self {
        self.segments.push(Segment::Param(key.into()));
        self
    }

    pub fn slot<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        if !self.slots.insert(name.clone()) && self.duplicate.is_none() {
            self.duplicate = Some(name.clone());
        }
        self.segments.push(Segment::Slot(name));
        self
    }

    /// Finishes the skeleton.
    ///
    /// # Errors
    /// * `Error::DuplicateInsertionPointError` if a fragment slot was declared twice
    pub fn build(self) -> Result<Skeleton> {
        if let Some(name) = self.duplicate {
            return Err(Error::DuplicateInsertionPointError { name });
        }
        Ok(Skeleton { segments: self.segments, slots: self.slots })
    }
}

impl Skeleton {
    pub fn builder() -> SkeletonBuilder {
        SkeletonBuilder::default()
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains(name)
    }

    /// Renders one target.
    ///
    /// Pure: the same target and library always produce the same bytes.
    ///
    /// # Errors
    /// * `Error::InvalidParameterError` if the parameter set fails validation
    /// * `Error::UnknownInsertionPointError` if the selection names a slot the skeleton lacks
    /// * `Error::FragmentNotFoundError` if a selected fragment is not in `library`
    /// * `Error::UnresolvedPlaceholderError` if any placeholder has no parameter
    pub fn render(&self, library: &FragmentLibrary, target: &Target) -> Result<String> {
        let label = target.id.to_string();
        let params = &target.parameters;
        params.validate(&label)?;

        if let Some(unknown) = target.selection.slots().find(|slot| !self.has_slot(slot)) {
            return Err(Error::UnknownInsertionPointError {
                target: label,
                insertion_point: unknown.to_string(),
            });
        }

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(key) => {
                    let value =
                        params.get(key).ok_or_else(|| Error::UnresolvedPlaceholderError {
                            target: label.clone(),
                            placeholder: key.clone(),
                            origin: "skeleton".to_string(),
                        })?;
                    out.push_str(value);
                }
                Segment::Slot(slot) => {
                    for name in target.selection.get(slot).unwrap_or_default() {
                        let fragment = library.lookup(&label, name)?;
                        let body = placeholder::substitute(fragment.body(), |key| params.get(key))
                            .map_err(|missing| Error::UnresolvedPlaceholderError {
                                target: label.clone(),
                                placeholder: missing,
                                origin: format!("fragment '{name}'"),
                            })?;
                        out.push_str(&body);
                    }
                }
            }
        }

        if let Some(marker) = placeholder::leftover_markers(&out).first() {
            return Err(Error::UnresolvedPlaceholderError {
                target: label,
                placeholder: marker.to_string(),
                origin: "rendered document".to_string(),
            });
        }

        debug!("Rendered '{}' ({} bytes)", label, out.len());
        Ok(out)
    }
}
