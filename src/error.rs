//! Error handling for pomgen.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors raised while composing build descriptors.
///
/// Authoring errors carry the id of the offending target so a batch report
/// can point straight at the broken matrix entry.
#[derive(Error, Debug)]
pub enum Error {
    /// A fragment selection names a fragment the library does not define.
    #[error("Target '{target}': fragment '{fragment}' is not defined.")]
    FragmentNotFoundError { target: String, fragment: String },

    /// A placeholder has no value in the target's parameter set.
    #[error("Target '{target}': placeholder '{placeholder}' in {origin} is unresolved.")]
    UnresolvedPlaceholderError { target: String, placeholder: String, origin: String },

    /// A fragment selection names a slot the skeleton does not define.
    #[error("Target '{target}': skeleton has no fragment insertion point '{insertion_point}'.")]
    UnknownInsertionPointError { target: String, insertion_point: String },

    /// A fragment name was defined twice in the same library.
    #[error("Fragment '{name}' is already defined.")]
    DuplicateFragmentDefinitionError { name: String },

    /// A skeleton declared the same insertion point twice.
    #[error("Insertion point '{name}' is already declared.")]
    DuplicateInsertionPointError { name: String },

    /// The matrix contains the same target id or output path twice.
    #[error("Target '{target}' duplicates an earlier target ({reason}).")]
    DuplicateTargetError { target: String, reason: String },

    /// A parameter key or value is not usable for substitution.
    #[error("Target '{target}': invalid parameter '{key}': {reason}.")]
    InvalidParameterError { target: String, key: String, reason: String },

    /// A target drifted away from its module version or its variant bundle.
    #[error("Target '{target}': parameter '{key}' is '{found}', expected '{expected}'.")]
    InconsistentParameterError { target: String, key: String, expected: String, found: String },

    /// Settings file or command line could not be turned into matrix options.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// File system failures while persisting documents.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Check mode found documents that differ from the files on disk.
    #[error("{count} generated documents are out of date.")]
    StaleDocumentsError { count: usize },

    /// One or more targets failed in a batch run.
    #[error("{failed} of {total} targets failed.")]
    BatchError { failed: usize, total: usize },
}

/// Convenience type alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
