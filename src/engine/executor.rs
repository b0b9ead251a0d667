#![forbid(unsafe_code)]

//! Parallel resolution of many files
//!
//! The resolver is read-only once built, so files are resolved concurrently
//! with rayon against one shared instance.

use crate::engine::resolver::{Resolution, Resolver};
use crate::error::ResolveError;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolution outcome for one discovered file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub resolution: Resolution,
}

/// Result of resolving a batch of files
#[derive(Debug)]
pub struct ExecutionResult {
    /// One report per input file, in input order
    pub reports: Vec<FileReport>,
    /// Files that will be linted
    pub files_evaluated: usize,
    /// Files skipped by ignores or target restriction
    pub files_excluded: usize,
}

/// Resolves batches of files against a shared resolver
pub struct ExecutionEngine {
    resolver: Arc<Resolver>,
}

impl ExecutionEngine {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolves every file in parallel
    ///
    /// # Errors
    ///
    /// Returns the first `ResolveError` in input order if any path is
    /// malformed. Files outside the resolver's base directory are reported
    /// as excluded, not as errors.
    pub fn execute(&self, files: Vec<PathBuf>) -> Result<ExecutionResult, ResolveError> {
        let reports = files
            .into_par_iter()
            .map(|path| {
                let resolution = self.resolver.resolve(&path)?;
                Ok(FileReport { path, resolution })
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;

        let files_excluded = reports
            .iter()
            .filter(|r| r.resolution.is_excluded())
            .count();
        let files_evaluated = reports.len() - files_excluded;

        tracing::debug!(files_evaluated, files_excluded, "resolved batch");

        Ok(ExecutionResult {
            reports,
            files_evaluated,
            files_excluded,
        })
    }
}
