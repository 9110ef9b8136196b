//! QA project layout: locating the images folder.
//!
//! A QA project is a directory holding everything that belongs to one
//! dataset. The canonical layout keeps the input images in a direct
//! subfolder named `images`:
//!
//! ```text
//! snowy_hillside
//!   └─ images
//!       ├─ img-001.tiff
//!       ├─ img-002.tiff
//!       └─ ...
//! ```
//!
//! Real project folders are messier, so [`resolve_images_folder`] falls back
//! to a heuristic: any direct child directory that holds at least one image
//! file is a candidate, and the resolver only answers when the candidate is
//! unique. All listings are non-recursive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::LayoutError;

/// File extensions recognized as input images. Matching is case-sensitive,
/// hence both spellings of each extension.
pub const IMAGE_EXTENSIONS: [&str; 8] = [
    "tif", "TIF", "tiff", "TIFF", "jpg", "JPG", "jpeg", "JPEG",
];

/// Name of the canonical images subfolder.
pub const IMAGES_FOLDER_NAME: &str = "images";

/// Checks whether `directory` directly contains at least one image file.
///
/// Only the immediate entries are considered; subdirectories are not
/// descended into.
pub fn contains_images(directory: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let has_image_extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| IMAGE_EXTENSIONS.contains(&extension));
        if has_image_extension {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Determines the single subfolder of `project_root` that holds the input
/// images.
///
/// A direct child directory literally named `images` wins unconditionally,
/// even when it is empty; the name alone is trusted. Otherwise every child
/// directory that directly contains an image file is a candidate, and the
/// resolver answers only when exactly one exists. Zero or several
/// candidates yield [`LayoutError::AmbiguousImagesFolder`] carrying the
/// project path and the candidate names.
pub fn resolve_images_folder(project_root: &Path) -> Result<PathBuf, LayoutError> {
    let canonical = project_root.join(IMAGES_FOLDER_NAME);
    if canonical.is_dir() {
        return Ok(canonical);
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(project_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && contains_images(&entry.path())? {
            candidates.push(entry.path());
        }
    }

    if candidates.len() == 1 {
        return Ok(candidates.remove(0));
    }
    Err(LayoutError::AmbiguousImagesFolder {
        project: project_root.to_path_buf(),
        candidates: candidates
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect(),
    })
}

/// Validates the strict QA project layout: the directory exists, has an
/// `images` subfolder, and that subfolder holds at least one image.
pub fn check_project(path: &Path) -> Result<(), LayoutError> {
    if !path.is_dir() {
        return Err(LayoutError::MissingProject(path.to_path_buf()));
    }
    let images_path = path.join(IMAGES_FOLDER_NAME);
    if !images_path.is_dir() {
        return Err(LayoutError::MissingImagesFolder {
            project: path.to_path_buf(),
        });
    }
    if !contains_images(&images_path)? {
        return Err(LayoutError::NoImages { images_path });
    }
    Ok(())
}

/// Result of scanning a root full of QA projects.
///
/// `images_paths` holds the resolved images folders; `faulty_projects` holds
/// the *project* directories for which resolution failed. Both follow
/// filesystem iteration order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct QaProjectScan {
    /// Resolved images folders, one per clean project.
    pub images_paths: Vec<PathBuf>,
    /// Projects where the images folder could not be determined.
    pub faulty_projects: Vec<PathBuf>,
}

/// Resolves the images folder of every direct child directory of `root`.
///
/// Layout failures are collected per project so one bad project cannot
/// abort the scan; I/O failures are fatal and propagate.
pub fn scan_projects_root(root: &Path) -> io::Result<QaProjectScan> {
    let mut scan = QaProjectScan::default();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match resolve_images_folder(&entry.path()) {
            Ok(images_path) => scan.images_paths.push(images_path),
            Err(LayoutError::Io(e)) => return Err(e),
            Err(_) => scan.faulty_projects.push(entry.path()),
        }
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn insert_dummy_images(directory: &Path) {
        for name in ["img-001.tiff", "img-002.tiff", "img-003.jpg"] {
            File::create(directory.join(name)).unwrap();
        }
    }

    #[test]
    fn test_folder_named_images_wins_even_when_empty() {
        let project = TempDir::new().unwrap();
        let images = project.path().join("images");
        fs::create_dir(&images).unwrap();
        // A sibling full of images does not matter; the name decides.
        let decoy = project.path().join("more_images");
        fs::create_dir(&decoy).unwrap();
        insert_dummy_images(&decoy);

        assert_eq!(resolve_images_folder(project.path()).unwrap(), images);
    }

    #[test]
    fn test_sole_image_bearing_subfolder_is_resolved() {
        let project = TempDir::new().unwrap();
        let the_input = project.path().join("the_input");
        fs::create_dir(&the_input).unwrap();
        insert_dummy_images(&the_input);
        fs::create_dir(project.path().join("no_input")).unwrap();

        assert_eq!(resolve_images_folder(project.path()).unwrap(), the_input);
    }

    #[test]
    fn test_ambiguous_candidates_raise_with_both_names() {
        let project = TempDir::new().unwrap();
        for name in ["images1", "images2"] {
            let candidate = project.path().join(name);
            fs::create_dir(&candidate).unwrap();
            insert_dummy_images(&candidate);
        }

        let err = resolve_images_folder(project.path()).unwrap_err();
        match err {
            LayoutError::AmbiguousImagesFolder {
                project: reported,
                mut candidates,
            } => {
                assert_eq!(reported, project.path());
                candidates.sort();
                assert_eq!(candidates, vec!["images1", "images2"]);
            }
            other => panic!("expected ambiguity error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_candidates_raise_with_count_zero() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("no_input")).unwrap();

        let err = resolve_images_folder(project.path()).unwrap_err();
        assert_eq!(err.candidate_count(), 0);
        assert!(err.to_string().contains("Found 0 sub-folders"));
    }

    #[test]
    fn test_extension_match_is_case_sensitive_per_allow_list() {
        let project = TempDir::new().unwrap();
        let folder = project.path().join("input");
        fs::create_dir(&folder).unwrap();
        File::create(folder.join("scan.Tiff")).unwrap(); // mixed case: not allowed

        let err = resolve_images_folder(project.path()).unwrap_err();
        assert_eq!(err.candidate_count(), 0);

        File::create(folder.join("scan.TIFF")).unwrap();
        assert_eq!(resolve_images_folder(project.path()).unwrap(), folder);
    }

    #[test]
    fn test_image_files_directly_in_project_root_do_not_count() {
        let project = TempDir::new().unwrap();
        insert_dummy_images(project.path());

        let err = resolve_images_folder(project.path()).unwrap_err();
        assert_eq!(err.candidate_count(), 0);
    }

    #[test]
    fn test_check_project_accepts_canonical_layout() {
        let project = TempDir::new().unwrap();
        let images = project.path().join("images");
        fs::create_dir(&images).unwrap();
        insert_dummy_images(&images);

        assert!(check_project(project.path()).is_ok());
    }

    #[test]
    fn test_check_project_rejects_missing_and_empty_images_folder() {
        let project = TempDir::new().unwrap();
        assert!(matches!(
            check_project(project.path()),
            Err(LayoutError::MissingImagesFolder { .. })
        ));

        fs::create_dir(project.path().join("images")).unwrap();
        assert!(matches!(
            check_project(project.path()),
            Err(LayoutError::NoImages { .. })
        ));
    }

    #[test]
    fn test_check_project_rejects_missing_directory() {
        let root = TempDir::new().unwrap();
        assert!(matches!(
            check_project(&root.path().join("gone")),
            Err(LayoutError::MissingProject(_))
        ));
    }

    #[test]
    fn test_scan_isolates_faulty_projects() {
        let root = TempDir::new().unwrap();

        let clean = root.path().join("snowy_hillside");
        let clean_images = clean.join("images");
        fs::create_dir_all(&clean_images).unwrap();
        insert_dummy_images(&clean_images);

        let ambiguous = root.path().join("ambiguous");
        for name in ["inputs_1", "inputs_2"] {
            let candidate = ambiguous.join(name);
            fs::create_dir_all(&candidate).unwrap();
            insert_dummy_images(&candidate);
        }

        let scan = scan_projects_root(root.path()).unwrap();
        assert_eq!(scan.images_paths, vec![clean_images]);
        assert_eq!(scan.faulty_projects, vec![ambiguous]);
    }

    #[test]
    fn test_scan_skips_plain_files_in_root() {
        let root = TempDir::new().unwrap();
        File::create(root.path().join("notes.txt")).unwrap();

        let scan = scan_projects_root(root.path()).unwrap();
        assert!(scan.images_paths.is_empty());
        assert!(scan.faulty_projects.is_empty());
    }
}
