//! The `pipeline` command: run `test_pipeline` against one dataset.
//!
//! The run gets a fresh output folder named after the next free id, the
//! binary's revision, the dataset and an optional description. The folder
//! ends up holding the enriched config, the git patches, `log.txt` and the
//! binary's results, with `stitched.tiff` renamed to something greppable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use lazyqa_core::config::write_pipeline_config;
use lazyqa_core::git::Repo;
use lazyqa_core::naming::{
    create_test_case_name, find_highest_id, get_next_id, parse_test_case_name,
    stitched_result_name,
};

use crate::executable::check_executable;
use crate::runner::Invocation;

/// Everything one `test_pipeline` run needs. `batch` builds these in a loop.
#[derive(Debug, Clone, Copy)]
pub struct PipelineRun<'a> {
    pub app_path: &'a Path,
    pub out_root: &'a Path,
    pub images_path: &'a Path,
    pub description: Option<&'a str>,
    pub config_path: &'a Path,
    /// Re-use the highest existing id instead of the next free one, so the
    /// runs of one batch share an id.
    pub reuse_id: bool,
    pub quiet: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    app_path: &Path,
    out_root: &Path,
    images_path: &Path,
    description: Option<&str>,
    config: Option<&Path>,
    reuse_id: bool,
    no_confirmation: bool,
    quiet: bool,
) -> Result<()> {
    check_executable(app_path, !no_confirmation)?;
    let config_path = super::resolve_config_path(config)?;

    let out_path = execute(&PipelineRun {
        app_path,
        out_root,
        images_path,
        description,
        config_path: &config_path,
        reuse_id,
        quiet,
    })?;
    println!("{} results in {}", "ok".green(), out_path.display());
    Ok(())
}

/// Runs the whole pipeline flow and returns the created output folder.
pub fn execute(run: &PipelineRun) -> Result<PathBuf> {
    let repo = Repo::discover(run.app_path)?;
    let name = test_case_dir_name(&repo, run)?;
    let out_path = run.out_root.join(&name);
    fs::create_dir(&out_path)
        .with_context(|| format!("failed to create output folder '{}'", out_path.display()))?;

    let enriched_config = write_pipeline_config(run.config_path, &out_path, run.images_path)?;
    repo.write_patches(&out_path)?;

    Invocation::new(run.app_path)
        .arg("-f")
        .arg(enriched_config.display().to_string())
        .arg("-o")
        .arg(out_path.display().to_string())
        .run_logged(Some(&out_path.join("log.txt")), run.quiet)?;

    rename_stitched_result(&out_path)?;
    Ok(out_path)
}

/// Builds the output folder name: id, revision, camel-cased name of the
/// images folder's parent, optional description.
fn test_case_dir_name(repo: &Repo, run: &PipelineRun) -> Result<String> {
    let id = if run.reuse_id {
        find_highest_id(run.out_root)?
    } else {
        get_next_id(run.out_root)?
    };
    let revision = repo.short_head_revision()?;
    let dataset_name = run
        .images_path
        .parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str())
        .with_context(|| {
            format!(
                "cannot derive a dataset name from '{}'",
                run.images_path.display()
            )
        })?;
    Ok(create_test_case_name(
        &id,
        &revision,
        dataset_name,
        run.description,
    )?)
}

/// Renames a too generic `stitched.tiff` to
/// `<id>_<dataset>[_<description>]_stitched.tiff`, derived from the output
/// folder's own name. No-op when the binary produced no stitched result.
fn rename_stitched_result(out_path: &Path) -> Result<Option<PathBuf>> {
    let stitched_path = out_path.join("stitched.tiff");
    if !stitched_path.exists() {
        return Ok(None);
    }
    let dir_name = out_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("output folder '{}' has no name", out_path.display()))?;
    let parsed = parse_test_case_name(dir_name)?;
    let target = out_path.join(stitched_result_name(&parsed));
    fs::rename(&stitched_path, &target)?;
    Ok(Some(target))
}
