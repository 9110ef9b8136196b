//! The `ortho` command: run `test_ortho` with a traceable output folder.
//!
//! Same skeleton as `pipeline`, with two differences: the project-name
//! component of the folder name is taken as-is (when re-using an id for a
//! batch, a unique name is what tells the runs apart, so it must not be
//! normalized away), and the config enrichment dictates the ortho output
//! filename instead of the input images.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use lazyqa_core::config::write_ortho_config;
use lazyqa_core::git::Repo;
use lazyqa_core::naming::{camel_case, find_highest_id, get_next_id, SEPARATOR};

use crate::executable::{check_executable, recompile};
use crate::runner::Invocation;

#[derive(Debug, Clone, Copy)]
pub struct OrthoRun<'a> {
    pub app_path: &'a Path,
    pub out_root: &'a Path,
    pub config_path: &'a Path,
    pub project_name: &'a str,
    pub description: Option<&'a str>,
    pub pipeline_output: Option<&'a Path>,
    pub extra_args: Option<&'a str>,
    pub extra_args_after: Option<&'a str>,
    pub debug: bool,
    pub reuse_id: bool,
    pub quiet: bool,
}

pub fn run(run: &OrthoRun, do_recompile: bool, no_confirmation: bool) -> Result<()> {
    if do_recompile {
        recompile(run.app_path, "test_ortho", run.quiet)?;
    }
    check_executable(run.app_path, !no_confirmation)?;
    let config_path = super::resolve_config_path(Some(run.config_path))?;

    let out_path = execute(&OrthoRun {
        config_path: &config_path,
        ..*run
    })?;
    println!("{} results in {}", "ok".green(), out_path.display());
    Ok(())
}

/// Runs the whole ortho flow and returns the created output folder.
pub fn execute(run: &OrthoRun) -> Result<PathBuf> {
    let repo = Repo::discover(run.app_path)?;
    let name = out_folder_name(&repo, run)?;
    let out_path = run.out_root.join(&name);
    fs::create_dir(&out_path)
        .with_context(|| format!("failed to create output folder '{}'", out_path.display()))?;

    let debug_dir = if run.debug {
        let debug_dir = out_path.join("debug");
        fs::create_dir(&debug_dir)?;
        Some(debug_dir)
    } else {
        None
    };

    let enriched_config = write_ortho_config(
        run.config_path,
        &out_path,
        debug_dir.as_deref(),
        run.pipeline_output,
    )?;
    repo.write_patches(&out_path)?;

    let mut invocation = Invocation::new(run.app_path);
    if let Some(args) = run.extra_args {
        invocation = invocation.arg("-c").arg(args);
    }
    invocation = invocation
        .arg("-f")
        .arg(enriched_config.display().to_string());
    if let Some(args) = run.extra_args_after {
        invocation = invocation.arg("-c").arg(args);
    }
    invocation.run_logged(Some(&out_path.join("log.txt")), run.quiet)?;

    Ok(out_path)
}

/// `<id>_<revision>_<projectName>[_<camelCasedDescription>]`.
fn out_folder_name(repo: &Repo, run: &OrthoRun) -> Result<String> {
    let id = if run.reuse_id {
        find_highest_id(run.out_root)?
    } else {
        get_next_id(run.out_root)?
    };
    let revision = repo.short_head_revision()?;
    let mut name = format!("{id}{SEPARATOR}{revision}{SEPARATOR}{}", run.project_name);
    if let Some(description) = run.description {
        name.push(SEPARATOR);
        name.push_str(&camel_case(description)?);
    }
    Ok(name)
}
