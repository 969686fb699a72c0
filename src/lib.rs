//! pomgen composes a family of build descriptors from one shared skeleton
//! and a library of reusable fragments, keeping project versions and
//! runtime-variant dependency pairings consistent across every module,
//! variant and deployment context.

/// Histogrammar skeleton, fragments and target matrix
pub mod catalog;

/// Command-line interface module for the pomgen binary
pub mod cli;

/// Batch composition of a whole target matrix
pub mod composer;

/// Settings file handling
/// Supports JSON and YAML formats (pomgen.json, pomgen.yml, pomgen.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Named, write-once fragments of document text
pub mod fragment;

/// Logger initialisation for the binary
pub mod logger;

/// Declarative target matrix and its consistency checks
pub mod matrix;

/// Per-target parameter sets
pub mod params;

/// Placeholder syntax and substitution
pub mod placeholder;

/// Shared document skeleton with named insertion points
pub mod skeleton;

/// Output targets
pub mod target;

/// Persistence of rendered documents
/// Writes, dry-runs or checks generated files
pub mod writer;
