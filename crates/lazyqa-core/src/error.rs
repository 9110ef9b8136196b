//! Error types for the lazyqa core.
//!
//! Filesystem errors (missing directory, permission denied) are deliberately
//! not wrapped: operations that touch the disk return `std::io::Error` as-is
//! and callers treat them as fatal for that single operation. The typed
//! errors below cover the recoverable failures a caller is expected to
//! branch on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the test-case naming component.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    /// The string does not fit the test-case name grammar.
    ///
    /// Recoverable: directory scans skip such entries.
    #[error("'{0}' is not a test case name")]
    NotATestCaseName(String),

    /// Camel-casing was asked to normalize an empty component, or one that
    /// starts with a separator and therefore has no leading word.
    #[error("cannot camel-case an empty or separator-led component")]
    EmptyComponent,

    /// The id component is not a decimal number that fits the fixed width.
    #[error("'{0}' is not a valid test case id")]
    InvalidId(String),
}

/// Errors raised when a QA project directory does not meet the expected
/// layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The project directory itself does not exist or is not a directory.
    #[error("directory '{0}' not found")]
    MissingProject(PathBuf),

    /// The project has no `images` subfolder.
    #[error("'{project}' missing folder 'images'")]
    MissingImagesFolder { project: PathBuf },

    /// The images folder exists but holds no image files.
    #[error("no images found in '{images_path}'")]
    NoImages { images_path: PathBuf },

    /// Zero or more than one image-bearing subfolder and none named
    /// `images`: the resolver refuses to guess.
    #[error(
        "In {project}: Found {} sub-folders containing images (expected 1): {candidates:?}",
        candidates.len()
    )]
    AmbiguousImagesFolder {
        project: PathBuf,
        candidates: Vec<String>,
    },

    /// Listing a directory failed. Batch scans treat this as fatal rather
    /// than as a faulty project.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// Number of image-bearing candidates behind an ambiguity error.
    ///
    /// Zero for every other variant.
    pub fn candidate_count(&self) -> usize {
        match self {
            LayoutError::AmbiguousImagesFolder { candidates, .. } => candidates.len(),
            _ => 0,
        }
    }
}

/// Errors raised by the git accessor.
#[derive(Debug, Error)]
pub enum GitError {
    /// The path does not lead into a git working tree.
    #[error("path '{0}' must lead into a git repo")]
    NotARepo(PathBuf),

    /// A git invocation exited non-zero.
    #[error("git {args:?} failed: {stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    /// Neither `origin/master`, `origin/main`, `master` nor `main` exists.
    #[error("could not guess main branch in repo '{0}'")]
    NoMainBranch(PathBuf),

    /// Failed to spawn git or to write a patch file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguity_error_reports_path_count_and_candidates() {
        let err = LayoutError::AmbiguousImagesFolder {
            project: PathBuf::from("/data/rollingMountain"),
            candidates: vec!["inputs_1".to_string(), "inputs_2".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/rollingMountain"));
        assert!(msg.contains("Found 2 sub-folders"));
        assert!(msg.contains("inputs_1"));
        assert!(msg.contains("inputs_2"));
        assert_eq!(err.candidate_count(), 2);
    }

    #[test]
    fn test_ambiguity_error_with_zero_candidates() {
        let err = LayoutError::AmbiguousImagesFolder {
            project: PathBuf::from("/data/empty"),
            candidates: vec![],
        };
        assert!(err.to_string().contains("Found 0 sub-folders"));
        assert_eq!(err.candidate_count(), 0);
    }

    #[test]
    fn test_not_a_test_case_name_display() {
        let err = NamingError::NotATestCaseName("report.txt".to_string());
        assert_eq!(err.to_string(), "'report.txt' is not a test case name");
    }
}
