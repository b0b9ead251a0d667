//! File discovery with gitignore support
//!
//! Walks the given roots with the `ignore` crate and yields every regular
//! file as an absolute, lexically normalized path. Deciding whether a file
//! is linted is the resolver's job, not the walker's.

use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Iterator source over the files below one root
pub struct FileWalker {
    walker: ignore::Walk,
    cwd: PathBuf,
}

impl FileWalker {
    /// Creates a walker rooted at `root`
    ///
    /// Relative roots are taken relative to the current directory.
    pub fn new(root: &Path) -> Result<Self, FileWalkerError> {
        let cwd = std::env::current_dir()?;
        Self::with_cwd(root, &cwd)
    }

    /// Creates a walker, resolving a relative `root` against `cwd`
    pub fn with_cwd(root: &Path, cwd: &Path) -> Result<Self, FileWalkerError> {
        let root = absolute_path(root, cwd);
        if !root.exists() {
            return Err(FileWalkerError::NotFound(root));
        }

        let walker = WalkBuilder::new(&root)
            .hidden(false) // Dotfiles are linted too
            .git_ignore(true)
            .require_git(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        Ok(Self {
            walker,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Walks the tree, yielding absolute file paths
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        let cwd = self.cwd;
        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    Some(Ok(absolute_path(entry.path(), &cwd)))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}

/// Joins `path` onto `cwd` if relative and folds `.` and `..` components
///
/// Purely lexical; symlinks are not followed.
pub fn absolute_path(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Collects the files below every root, sorted and deduplicated
pub fn discover_files(roots: &[PathBuf], cwd: &Path) -> Result<Vec<PathBuf>, FileWalkerError> {
    let mut files = Vec::new();
    for root in roots {
        for file in FileWalker::with_cwd(root, cwd)?.walk() {
            files.push(file?);
        }
    }
    files.sort();
    files.dedup();
    tracing::debug!(roots = roots.len(), files = files.len(), "discovered files");
    Ok(files)
}
