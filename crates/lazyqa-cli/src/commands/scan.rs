//! The `scan` command: resolve the images folder of every QA project under
//! a root, without running anything. Useful to vet a dataset collection
//! before kicking off a long batch.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use lazyqa_core::project::scan_projects_root;

pub fn run(projects_root: &Path, json: bool) -> Result<()> {
    let scan = scan_projects_root(projects_root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
        return Ok(());
    }

    println!("{}", "Images paths:".bold());
    for images_path in &scan.images_paths {
        println!("  {} {}", "->".green(), images_path.display());
    }
    if !scan.faulty_projects.is_empty() {
        println!("{}", "Faulty projects:".bold());
        for project in &scan.faulty_projects {
            println!("  {} {}", "!!".yellow(), project.display());
        }
    }
    println!(
        "{} resolved, {} faulty",
        scan.images_paths.len(),
        scan.faulty_projects.len()
    );
    Ok(())
}
