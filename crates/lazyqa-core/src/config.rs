//! Enrichment of the INI configs consumed by the QA binaries.
//!
//! The user's config is never modified in place: it is copied into the
//! freshly created output folder and the copy is enriched, so every result
//! folder carries the exact configuration it was produced with. The format
//! is the line-oriented INI dialect the external binaries parse themselves;
//! section and key names are their contract and must stay stable.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the enriched config copied next to `test_pipeline` results.
pub const PIPELINE_CONFIG_NAME: &str = "pipeline.ini";

/// Name of the enriched config copied next to `test_ortho` results.
pub const ORTHO_CONFIG_NAME: &str = "ortho.ini";

/// Builds the `[metric]` block listing every input image of a dataset.
///
/// The images go into the config rather than onto the command line because
/// some operating systems limit the command line length.
pub fn pipeline_input_block(images_path: &Path) -> io::Result<String> {
    let mut image_names = Vec::new();
    for entry in fs::read_dir(images_path)? {
        image_names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(format!(
        "[metric]\npath = {}\ninputs = {}\n",
        images_path.display(),
        image_names.join(",")
    ))
}

/// Copies the user's config to `<out_dir>/pipeline.ini` and appends the
/// input block for `images_path`. Returns the path of the enriched copy.
pub fn write_pipeline_config(
    config_path: &Path,
    out_dir: &Path,
    images_path: &Path,
) -> io::Result<PathBuf> {
    let enriched_path = out_dir.join(PIPELINE_CONFIG_NAME);
    let mut content = fs::read_to_string(config_path)?;
    content.push('\n');
    content.push_str(&pipeline_input_block(images_path)?);
    fs::write(&enriched_path, content)?;
    Ok(enriched_path)
}

/// An INI document that preserves section and key insertion order.
///
/// Just enough of the dialect for enrichment: `[section]` headers,
/// `key = value` lines, `#`/`;` comments and blank lines are dropped on
/// parse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniDocument {
    /// Parses `content`, keeping sections and keys in file order.
    pub fn parse(content: &str) -> Self {
        let mut document = Self::default();
        let mut current: Option<usize> = None;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(document.section_index(name.trim()));
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                // Keys before any section header would be lost; the QA
                // binaries' configs always start with a header.
                if let Some(index) = current {
                    document.sections[index]
                        .1
                        .push((key.trim().to_string(), value.trim().to_string()));
                }
            }
        }
        document
    }

    fn section_index(&mut self, section: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|(name, _)| name == section) {
            return index;
        }
        self.sections.push((section.to_string(), Vec::new()));
        self.sections.len() - 1
    }

    /// Sets `key` in `section` to `value`, creating the section on demand
    /// and overwriting an existing value.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.section_index(section);
        let entries = &mut self.sections[index].1;
        match entries.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value.into(),
            None => entries.push((key.to_string(), value.into())),
        }
    }

    /// Looks up `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)?
            .1
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (section, entries)) in self.sections.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{section}]")?;
            for (key, value) in entries {
                writeln!(f, "{key} = {value}")?;
            }
        }
        Ok(())
    }
}

/// Copies the user's config to `<out_dir>/ortho.ini`, dictating the output
/// filename and optionally wiring in debug tiles and a prior
/// `test_pipeline` result. Returns the path of the enriched copy.
///
/// - `[output] filename` points at `<out_dir>/<out_dir_name>.tif`.
/// - `debug_dir`, when given, lands in `[color_balance] debug_tiles_path`.
/// - `pipeline_project`, when given, is assumed to be a `test_pipeline`
///   output folder: `[images] opfProject` reads its `opf/project.json` and
///   `[dsm] input_file` its `dsm.tiff`.
pub fn write_ortho_config(
    config_path: &Path,
    out_dir: &Path,
    debug_dir: Option<&Path>,
    pipeline_project: Option<&Path>,
) -> io::Result<PathBuf> {
    let mut document = IniDocument::parse(&fs::read_to_string(config_path)?);

    let ortho_name = out_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ortho_path = out_dir.join(format!("{ortho_name}.tif"));
    document.set("output", "filename", ortho_path.display().to_string());

    if let Some(debug_dir) = debug_dir {
        document.set(
            "color_balance",
            "debug_tiles_path",
            debug_dir.display().to_string(),
        );
    }

    if let Some(project) = pipeline_project {
        document.set(
            "images",
            "opfProject",
            project.join("opf").join("project.json").display().to_string(),
        );
        document.set(
            "dsm",
            "input_file",
            project.join("dsm.tiff").display().to_string(),
        );
    }

    let enriched_path = out_dir.join(ORTHO_CONFIG_NAME);
    fs::write(&enriched_path, document.to_string())?;
    Ok(enriched_path)
}
