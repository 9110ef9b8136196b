//! CLI argument definitions for the lazyqa command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined
//! here, keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lazyqa - run the QA test binaries for lazy people
#[derive(Parser)]
#[command(name = "lazyqa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run test_pipeline against one dataset, results in a traceable output folder
    Pipeline {
        /// Path to the test_pipeline executable. Assumed to be somewhere inside its repo
        #[arg(short = 'x', long = "test-pipeline")]
        test_pipeline: PathBuf,

        /// Where to store the output. The run adds a new sub-directory
        #[arg(short, long)]
        out_path: PathBuf,

        /// Path to the images directory. The parent folder name names the output sub-directory
        #[arg(short, long)]
        images_path: PathBuf,

        /// Optional description, appended to the output folder name
        #[arg(short, long)]
        description: Option<String>,

        /// Path to the config.ini. Default is ./config.ini. Copied and enriched into the output folder
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Re-use the highest existing id instead of taking the next one (marks runs as one batch)
        #[arg(long)]
        reuse_id: bool,

        /// Suppress any user prompts. Handy when called from a non-interactive script
        #[arg(long)]
        no_confirmation: bool,

        /// Do not mirror the binary's output to the console (it still lands in log.txt)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run test_ortho, results in a traceable output folder
    Ortho {
        /// Path to the test_ortho executable. Assumed to be somewhere inside its repo
        #[arg(short = 'x', long = "test-ortho")]
        test_ortho: PathBuf,

        /// Where to store the output. The run adds a new sub-directory
        #[arg(short, long, default_value = ".")]
        out_path: PathBuf,

        /// Path to the config.ini. Copied and enriched into the output folder
        #[arg(short, long, default_value = "./config.ini")]
        config: PathBuf,

        /// Name to identify the project, part of the output folder name
        #[arg(short, long, default_value = "ortho")]
        project_name: String,

        /// Optional description, appended to the output folder name
        #[arg(short, long)]
        description: Option<String>,

        /// Path to a pipeline output folder whose opf/dsm should be processed
        #[arg(short = 't', long)]
        pipeline_output: Option<PathBuf>,

        /// Extra command line arguments passed to test_ortho before the config
        #[arg(long)]
        args: Option<String>,

        /// Extra command line arguments passed after the config, overriding config values
        #[arg(long)]
        args_after: Option<String>,

        /// Generate debug tiles in subfolder 'debug'
        #[arg(long)]
        debug: bool,

        /// Rebuild test_ortho via cmake before running it
        #[arg(long)]
        recompile: bool,

        /// Re-use the highest existing id instead of taking the next one (marks runs as one batch)
        #[arg(long)]
        reuse_id: bool,

        /// Suppress any user prompts. Handy when called from a non-interactive script
        #[arg(long)]
        no_confirmation: bool,

        /// Do not mirror the binary's output to the console (it still lands in log.txt)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run test_pipeline for every QA project under a root directory
    Batch {
        /// Path to the test_pipeline executable. Assumed to be somewhere inside its repo
        #[arg(short = 'x', long = "test-pipeline")]
        test_pipeline: PathBuf,

        /// Where to store the outputs. Every run adds a new sub-directory
        #[arg(short, long)]
        out_path: PathBuf,

        /// Root directory containing one QA project per sub-directory
        #[arg(short, long)]
        projects_root: PathBuf,

        /// Optional description, appended to every output folder name
        #[arg(short, long)]
        description: Option<String>,

        /// Path to the config.ini. Default is ./config.ini. Copied and enriched per run
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress any user prompts. Handy when called from a non-interactive script
        #[arg(long)]
        no_confirmation: bool,

        /// Do not mirror the binaries' output to the console (it still lands in log.txt)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Resolve the images folder of every QA project under a root, without running anything
    Scan {
        /// Root directory containing one QA project per sub-directory
        projects_root: PathBuf,

        /// Output machine-readable JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}
