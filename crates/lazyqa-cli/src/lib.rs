//! lazyqa CLI library.
//!
//! This crate provides the command implementations behind the `lazyqa`
//! binary: pre-flight executable checks, subprocess running with log
//! mirroring, and the pipeline/ortho/batch/scan flows.

pub mod commands;
pub mod executable;
pub mod runner;
