//! lazyqa core library
//!
//! This crate provides the deterministic pieces behind the `lazyqa` runners
//! for the external QA binaries (`test_pipeline`, `test_ortho`):
//!
//! - [`naming`]: test-case folder names (`<id>_<revision>_<dataset>[_<description>]`),
//!   id sequencing over an output directory, and stitched-result renaming
//! - [`project`]: locating the images folder inside a QA project and scanning
//!   whole project roots
//! - [`git`]: a thin git accessor for revision tags and patch extraction
//! - [`config`]: enrichment of the INI configs consumed by the QA binaries
//! - [`error`]: typed failures for all of the above
//!
//! Everything here is synchronous and stateless: id sequencing re-reads the
//! output directory on every call, so the filesystem stays the single source
//! of truth.
//!
//! # Example
//!
//! ```
//! use lazyqa_core::naming::{create_test_case_name, parse_test_case_name};
//!
//! let name = create_test_case_name("001", "1234567890", "snowy_Hillside", None).unwrap();
//! assert_eq!(name, "001_1234567890_snowyHillside");
//!
//! let parsed = parse_test_case_name(&name).unwrap();
//! assert_eq!(parsed.dataset_name, "snowyHillside");
//! assert_eq!(parsed.optional_description, None);
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod naming;
pub mod project;

// Re-export commonly used types at the crate root
pub use error::{GitError, LayoutError, NamingError};
pub use naming::TestCaseName;
pub use project::QaProjectScan;
