//! Output targets: one (module, variant, context) document to produce.

use crate::params::ParameterSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where a generated document is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentContext {
    /// Day-to-day build; runtime variant chosen through build profiles.
    Local,
    /// Signed and staged release for one concrete runtime variant.
    Release,
}

impl DeploymentContext {
    pub fn all() -> &'static [DeploymentContext] {
        &[DeploymentContext::Local, DeploymentContext::Release]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentContext::Local => "local",
            DeploymentContext::Release => "release",
        }
    }
}

impl fmt::Display for DeploymentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(DeploymentContext::Local),
            "release" => Ok(DeploymentContext::Release),
            other => {
                Err(format!("unknown deployment context '{other}' (expected: local, release)"))
            }
        }
    }
}

/// Identity of a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId {
    pub module: String,
    pub variant: String,
    pub context: DeploymentContext,
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.module, self.variant, self.context)
    }
}

/// Insertion point name mapped to the ordered fragment names filling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSelection {
    slots: IndexMap<String, Vec<String>>,
}

impl FragmentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragments` to the slot's list, in order.
    pub fn fill<S, I, F>(&mut self, slot: S, fragments: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.slots
            .entry(slot.into())
            .or_default()
            .extend(fragments.into_iter().map(Into::into));
        self
    }

    pub fn get(&self, slot: &str) -> Option<&[String]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One concrete document to produce.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub output_path: PathBuf,
    pub selection: FragmentSelection,
    pub parameters: ParameterSet,
}
