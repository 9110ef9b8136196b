//! lazyqa - run the QA test binaries for lazy people.
//!
//! Wraps `test_pipeline` and `test_ortho`: checks the binary for staleness,
//! writes the results to an automatically generated output folder, and
//! attaches patches tracking the exact code state the binary was built
//! from.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
use lazyqa_cli::commands;
use lazyqa_cli::commands::ortho::OrthoRun;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pipeline {
            test_pipeline,
            out_path,
            images_path,
            description,
            config,
            reuse_id,
            no_confirmation,
            quiet,
        } => commands::pipeline::run(
            &test_pipeline,
            &out_path,
            &images_path,
            description.as_deref(),
            config.as_deref(),
            reuse_id,
            no_confirmation,
            quiet,
        ),
        Commands::Ortho {
            test_ortho,
            out_path,
            config,
            project_name,
            description,
            pipeline_output,
            args,
            args_after,
            debug,
            recompile,
            reuse_id,
            no_confirmation,
            quiet,
        } => commands::ortho::run(
            &OrthoRun {
                app_path: &test_ortho,
                out_root: &out_path,
                config_path: &config,
                project_name: &project_name,
                description: description.as_deref(),
                pipeline_output: pipeline_output.as_deref(),
                extra_args: args.as_deref(),
                extra_args_after: args_after.as_deref(),
                debug,
                reuse_id,
                quiet,
            },
            recompile,
            no_confirmation,
        ),
        Commands::Batch {
            test_pipeline,
            out_path,
            projects_root,
            description,
            config,
            no_confirmation,
            quiet,
        } => commands::batch::run(
            &test_pipeline,
            &out_path,
            &projects_root,
            description.as_deref(),
            config.as_deref(),
            no_confirmation,
            quiet,
        ),
        Commands::Scan {
            projects_root,
            json,
        } => commands::scan::run(&projects_root, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
