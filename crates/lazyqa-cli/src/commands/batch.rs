//! The `batch` command: run `test_pipeline` for every QA project under a
//! root directory.
//!
//! The first run takes a fresh id and the remaining runs re-use it, so all
//! results of one batch are identifiable as belonging together. A project
//! whose images folder cannot be resolved, or whose run fails, is reported
//! at the end instead of aborting the rest of the batch.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use lazyqa_core::project::scan_projects_root;

use crate::commands::pipeline::{self, PipelineRun};
use crate::executable::check_executable;

#[allow(clippy::too_many_arguments)]
pub fn run(
    app_path: &Path,
    out_root: &Path,
    projects_root: &Path,
    description: Option<&str>,
    config: Option<&Path>,
    no_confirmation: bool,
    quiet: bool,
) -> Result<()> {
    check_executable(app_path, !no_confirmation)?;
    let config_path = super::resolve_config_path(config)?;

    let scan = scan_projects_root(projects_root)?;
    if scan.images_paths.is_empty() {
        println!(
            "{} no resolvable QA projects under {}",
            "!!".yellow(),
            projects_root.display()
        );
    }

    let mut failed_runs = Vec::new();
    for (index, images_path) in scan.images_paths.iter().enumerate() {
        let pipeline_run = PipelineRun {
            app_path,
            out_root,
            images_path,
            description,
            config_path: &config_path,
            // one id for the whole batch
            reuse_id: index > 0,
            quiet,
        };
        match pipeline::execute(&pipeline_run) {
            Ok(out_path) => println!("{} {}", "ok".green(), out_path.display()),
            Err(e) => {
                eprintln!("{} {}: {e:#}", "!!".red(), images_path.display());
                failed_runs.push(images_path.clone());
            }
        }
    }

    if !scan.faulty_projects.is_empty() {
        println!("{}", "Projects without a resolvable images folder:".bold());
        for project in &scan.faulty_projects {
            println!("  {} {}", "!!".yellow(), project.display());
        }
    }
    if !failed_runs.is_empty() {
        anyhow::bail!("{} of {} runs failed", failed_runs.len(), scan.images_paths.len());
    }
    Ok(())
}
