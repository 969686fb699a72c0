//! Batch composition of every target in a matrix.
//!
//! A failing target never stops the batch: each failure is recorded next to
//! the target that caused it and the remaining targets still render.

use crate::error::{Error, Result};
use crate::fragment::FragmentLibrary;
use crate::matrix::TargetMatrix;
use crate::skeleton::Skeleton;
use crate::target::{Target, TargetId};
use crate::writer::{DocumentSink, WriteOutcome};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

/// A successfully rendered target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub target: TargetId,
    pub output_path: PathBuf,
    pub content: String,
}

/// A target that could not be rendered or persisted.
#[derive(Debug)]
pub struct TargetFailure {
    pub target: TargetId,
    pub error: Error,
}

/// Everything one run produced, successes and failures apart.
#[derive(Debug, Default)]
pub struct ComposeReport {
    pub documents: Vec<RenderedDocument>,
    pub failures: Vec<TargetFailure>,
    /// Number of targets in the matrix, duplicates included.
    pub total: usize,
}

impl ComposeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn document(&self, id: &TargetId) -> Option<&RenderedDocument> {
        self.documents.iter().find(|doc| &doc.target == id)
    }

    /// Hands every rendered document to `sink` once, in matrix order.
    ///
    /// Write errors become failures of the affected target.
    pub fn persist(&mut self, sink: &mut dyn DocumentSink) -> Vec<WriteOutcome> {
        let mut outcomes = Vec::with_capacity(self.documents.len());
        for doc in &self.documents {
            match sink.persist(&doc.output_path, &doc.content) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    warn!("{}", error);
                    self.failures.push(TargetFailure { target: doc.target.clone(), error });
                }
            }
        }
        outcomes
    }

    /// Turns a report with failures into `Error::BatchError`.
    pub fn ensure_success(&self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::BatchError { failed: self.failures.len(), total: self.total })
        }
    }
}

/// Renders targets against one skeleton and fragment library.
#[derive(Debug)]
pub struct Composer {
    skeleton: Skeleton,
    library: FragmentLibrary,
}

impl Composer {
    pub fn new(skeleton: Skeleton, library: FragmentLibrary) -> Self {
        Self { skeleton, library }
    }

    /// Renders a single target.
    pub fn render(&self, target: &Target) -> Result<String> {
        self.skeleton.render(&self.library, target)
    }

    /// Renders every distinct target of `matrix` exactly once.
    ///
    /// Duplicate ids or output paths and targets that fail the consistency
    /// check are reported without rendering. The rest render in parallel;
    /// documents and failures both come back in matrix order.
    pub fn compose_all(&self, matrix: &TargetMatrix) -> ComposeReport {
        let mut seen_ids = HashSet::new();
        let mut seen_paths = HashSet::new();
        let checker = matrix.checker();
        let mut failures: Vec<(usize, TargetFailure)> = Vec::new();
        let mut pending: Vec<(usize, &Target)> = Vec::new();

        for (index, target) in matrix.targets.iter().enumerate() {
            let duplicate = if !seen_ids.insert(&target.id) {
                Some("same target id".to_string())
            } else if !seen_paths.insert(&target.output_path) {
                Some(format!("output path '{}' already used", target.output_path.display()))
            } else {
                None
            };
            let checked = match duplicate {
                Some(reason) => Err(Error::DuplicateTargetError {
                    target: target.id.to_string(),
                    reason,
                }),
                None => checker.check(target),
            };
            match checked {
                Ok(()) => pending.push((index, target)),
                Err(error) => {
                    failures.push((index, TargetFailure { target: target.id.clone(), error }))
                }
            }
        }

        let rendered: Vec<(usize, &Target, Result<String>)> = pending
            .par_iter()
            .map(|(index, target)| (*index, *target, self.render(target)))
            .collect();

        let mut documents = Vec::new();
        for (index, target, result) in rendered {
            match result {
                Ok(content) => {
                    debug!("Composed '{}' -> {}", target.id, target.output_path.display());
                    documents.push(RenderedDocument {
                        target: target.id.clone(),
                        output_path: target.output_path.clone(),
                        content,
                    });
                }
                Err(error) => {
                    failures.push((index, TargetFailure { target: target.id.clone(), error }))
                }
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        let failures: Vec<TargetFailure> = failures.into_iter().map(|(_, f)| f).collect();
        for failure in &failures {
            warn!("{}", failure.error);
        }
        info!(
            "Composed {} of {} targets ({} failed)",
            documents.len(),
            matrix.targets.len(),
            failures.len()
        );

        ComposeReport { documents, failures, total: matrix.targets.len() }
    }
}
