//! Thin git accessor.
//!
//! Every QA result folder records the exact code state it was produced
//! from: the short HEAD revision becomes part of the folder name, and two
//! patch files capture what a plain checkout of the main branch would not
//! contain. Everything shells out to the `git` binary; no libgit2.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::GitError;

/// Patch file holding the commits not yet on the main branch.
pub const BRANCH_PATCH_NAME: &str = "changesNotOnMainBranch.patch";

/// Patch file holding the uncommitted working-tree changes.
pub const DIRTY_PATCH_NAME: &str = "untrackedChanges.patch";

fn git_output(args: &[&str], cwd: Option<&Path>) -> Result<String, GitError> {
    let mut command = Command::new("git");
    if let Some(directory) = cwd {
        command.arg("-C").arg(directory);
    }
    command.args(args);
    let output = command.output()?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            args: args.iter().map(|s| s.to_string()).collect(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Checks whether `path` leads to a directory inside a git working tree.
///
/// File paths are checked via their parent directory.
pub fn is_inside_git_repo(path: &Path) -> bool {
    let directory = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    git_output(&["rev-parse", "--is-inside-work-tree"], Some(directory)).is_ok()
}

/// A handle to a git working tree, anchored at its top level.
#[derive(Debug, Clone)]
pub struct Repo {
    toplevel: PathBuf,
}

impl Repo {
    /// Creates a handle from any path leading into a working tree. A path
    /// to a file (e.g. the QA executable) resolves via its parent
    /// directory.
    pub fn discover(path_into_repo: &Path) -> Result<Self, GitError> {
        let directory = if path_into_repo.is_dir() {
            path_into_repo
        } else {
            path_into_repo.parent().unwrap_or(path_into_repo)
        };
        if !is_inside_git_repo(directory) {
            return Err(GitError::NotARepo(path_into_repo.to_path_buf()));
        }
        let toplevel = git_output(&["rev-parse", "--show-toplevel"], Some(directory))?;
        Ok(Self {
            toplevel: PathBuf::from(toplevel),
        })
    }

    /// Top-level directory of the working tree.
    pub fn path(&self) -> &Path {
        &self.toplevel
    }

    fn git(&self, args: &[&str]) -> Result<String, GitError> {
        git_output(args, Some(&self.toplevel))
    }

    /// Full revision of `commitish`.
    pub fn revision_of(&self, commitish: &str) -> Result<String, GitError> {
        self.git(&["rev-parse", commitish])
    }

    /// Short revision of HEAD, the token embedded in test-case names.
    pub fn short_head_revision(&self) -> Result<String, GitError> {
        self.git(&["rev-parse", "--short", "HEAD"])
    }

    /// Merge base of two commits.
    pub fn merge_base(&self, commit1: &str, commit2: &str) -> Result<String, GitError> {
        self.git(&["merge-base", commit1, commit2])
    }

    /// Guesses whether `master` or `main` is the main development branch,
    /// preferring the remote-tracking refs.
    ///
    /// `git ls-remote --heads origin` would be authoritative but hits the
    /// network; `show-branch` against local refs is instant.
    pub fn guess_main_branch(&self) -> Result<String, GitError> {
        for guess in ["origin/master", "origin/main", "master", "main"] {
            if self.git(&["show-branch", guess]).is_ok() {
                return Ok(guess.to_string());
            }
        }
        Err(GitError::NoMainBranch(self.toplevel.clone()))
    }

    /// Patch covering the commits from `from` (exclusive) up to HEAD.
    pub fn patch_since(&self, from: &str) -> Result<String, GitError> {
        self.git(&["format-patch", &format!("{from}..HEAD"), "--stdout"])
    }

    /// Patch covering all commits on the current branch that are not on the
    /// main branch.
    pub fn changes_not_on_main_branch(&self) -> Result<String, GitError> {
        let main_branch = self.guess_main_branch()?;
        let merge_base = self.merge_base("HEAD", &main_branch)?;
        self.patch_since(&merge_base)
    }

    /// Patch of the uncommitted working-tree changes.
    ///
    /// Newly created files that were never added are not part of a
    /// `git diff` and therefore missing from this patch.
    pub fn uncommitted_changes(&self) -> Result<String, GitError> {
        self.git(&["diff"])
    }

    /// Writes both traceability patches next to the test-case artifacts in
    /// `out_dir`. Empty patches are skipped, so a clean checkout of the
    /// main branch produces no patch files at all.
    pub fn write_patches(&self, out_dir: &Path) -> Result<(), GitError> {
        let branch_patch = self.changes_not_on_main_branch()?;
        if !branch_patch.is_empty() {
            fs::write(out_dir.join(BRANCH_PATCH_NAME), &branch_patch)?;
        }
        let dirty_patch = self.uncommitted_changes()?;
        if !dirty_patch.is_empty() {
            fs::write(out_dir.join(DIRTY_PATCH_NAME), &dirty_patch)?;
        }
        Ok(())
    }
}
