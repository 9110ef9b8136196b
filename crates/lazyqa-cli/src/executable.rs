//! Pre-flight checks for the QA executables.
//!
//! Every run starts by making sure the binary exists, is actually a file,
//! can be executed, and lives inside a git repo (otherwise no revision tag
//! and no patches). A binary older than a minute is probably stale, so the
//! user is asked to confirm before it is used.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use colored::Colorize;

use lazyqa_core::git::is_inside_git_repo;

use crate::runner::Invocation;

/// Mtime age above which a binary is considered possibly stale.
const STALE_AFTER_SECS: u64 = 60;

/// Validates `app_path` before a run.
///
/// With `prompt_user_confirmation`, a stale binary pauses for the user to
/// press enter; without it, the age warning is printed and the run
/// continues.
pub fn check_executable(app_path: &Path, prompt_user_confirmation: bool) -> Result<()> {
    if !app_path.exists() {
        bail!("binary {} not found", app_path.display());
    }
    if app_path.is_dir() {
        bail!("binary {} is actually a directory", app_path.display());
    }
    if !is_executable(app_path) {
        bail!("binary {} is not executable", app_path.display());
    }
    if !is_inside_git_repo(app_path) {
        bail!("binary {} must be inside a git repo", app_path.display());
    }

    let modified = app_path
        .metadata()
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("cannot read mtime of {}", app_path.display()))?;
    let age_secs = SystemTime::now()
        .duration_since(modified)
        .map(|age| age.as_secs())
        .unwrap_or(0);
    if age_secs > STALE_AFTER_SECS {
        let built: DateTime<Local> = modified.into();
        println!(
            "{} binary built {} ({} old)",
            "age:".yellow(),
            built.format("%Y-%m-%d %H:%M:%S"),
            format_age(age_secs).yellow()
        );
        if prompt_user_confirmation {
            wait_for_enter()?;
        }
    }
    Ok(())
}

/// Rebuilds `target` with cmake, assuming the usual `<build>/bin/<binary>`
/// layout (the build directory is the binary's grandparent).
pub fn recompile(app_path: &Path, target: &str, quiet: bool) -> Result<()> {
    let build_dir = app_path
        .parent()
        .and_then(Path::parent)
        .with_context(|| format!("cannot derive build directory from {}", app_path.display()))?;
    println!("re-compiling {target}...");
    Invocation::new(Path::new("cmake"))
        .arg("--build")
        .arg(build_dir.display().to_string())
        .arg("-t")
        .arg(target)
        .run_logged(None, quiet)?;
    Ok(())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

fn wait_for_enter() -> Result<()> {
    print!("(press enter to continue)");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn format_age(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}
