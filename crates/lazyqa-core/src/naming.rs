//! Test-case naming scheme.
//!
//! Every QA run gets its own output folder named
//! `<id>_<revision>_<datasetName>[_<optionalDescription>]`, e.g.
//! `003_1a2b3c4_snowyHillside_increasedStepSizeTo42`. The id is a
//! fixed-width, zero-padded decimal; the remaining components are
//! alphanumeric tokens with the separator stripped out by camel-casing.
//!
//! Id sequencing is stateless: the next id is recomputed from the entries of
//! the output directory on every call, so manually deleting result folders
//! never corrupts a counter. Two concurrent invocations on the same output
//! root can therefore compute the same id; that race is accepted.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::NamingError;

/// Separator between the components of a test-case name.
pub const SEPARATOR: char = '_';

/// Width of the id component, e.g. `005` for a width of 3.
pub const ID_LEN: usize = 3;

/// Pattern matching the components of a test case name, anchored at both
/// ends. Components: id, revision tag, dataset name, optional description.
/// `[^\W_]` is "alphanumeric without underscore".
const TEST_CASE_NAME_PATTERN: &str = r"^([0-9]+)_([^\W_]+)_([^\W_]+)(?:_([^\W_]*))?$";

static TEST_CASE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn test_case_name_regex() -> &'static Regex {
    TEST_CASE_NAME_REGEX
        .get_or_init(|| Regex::new(TEST_CASE_NAME_PATTERN).expect("invalid regex pattern"))
}

/// The parsed components of a test-case name.
///
/// `optional_description` distinguishes a name with no trailing component
/// (`None`) from one ending in a bare separator (`Some("")`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseName {
    /// Zero-padded decimal id, e.g. `005`.
    pub id: String,
    /// Short revision token, typically a git commit hash. Opaque here.
    pub revision_tag: String,
    /// Camel-cased dataset identifier.
    pub dataset_name: String,
    /// Camel-cased free-text description, if any.
    pub optional_description: Option<String>,
}

/// Turns `s` into camel case, removing any of the separators `_ .-` and space.
///
/// The first component is kept as-is; each later component gets its first
/// character upper-cased and the rest untouched (`MyWord` stays `MyWord`).
///
/// Returns [`NamingError::EmptyComponent`] when `s` is empty or starts with
/// a separator, since the result would have no leading word.
///
/// # Example
///
/// ```
/// use lazyqa_core::naming::camel_case;
/// assert_eq!(camel_case("snowy_Hillside").unwrap(), "snowyHillside");
/// ```
pub fn camel_case(s: &str) -> Result<String, NamingError> {
    const COMPONENT_SEPARATORS: [char; 4] = ['_', ' ', '.', '-'];
    let mut components = s.split(|c: char| COMPONENT_SEPARATORS.contains(&c));
    let first = components
        .next()
        .filter(|component| !component.is_empty())
        .ok_or(NamingError::EmptyComponent)?;

    let mut result = String::with_capacity(s.len());
    result.push_str(first);
    for component in components {
        let mut chars = component.chars();
        if let Some(head) = chars.next() {
            result.extend(head.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    Ok(result)
}

/// Builds a test-case name from its components.
///
/// `id` and `revision_tag` are passed through unchanged; the dataset name
/// and the optional description are camel-cased so they cannot contain the
/// separator.
pub fn create_test_case_name(
    id: &str,
    revision_tag: &str,
    dataset_name: &str,
    optional_description: Option<&str>,
) -> Result<String, NamingError> {
    let mut result = format!(
        "{id}{SEPARATOR}{revision_tag}{SEPARATOR}{}",
        camel_case(dataset_name)?
    );
    if let Some(description) = optional_description {
        result.push(SEPARATOR);
        result.push_str(&camel_case(description)?);
    }
    Ok(result)
}

/// Parses a test-case name into its components.
///
/// The name must match the grammar in full; a valid prefix followed by
/// garbage (e.g. `001_abc_def.tiff`) is rejected with
/// [`NamingError::NotATestCaseName`].
pub fn parse_test_case_name(name: &str) -> Result<TestCaseName, NamingError> {
    let captures = test_case_name_regex()
        .captures(name)
        .ok_or_else(|| NamingError::NotATestCaseName(name.to_string()))?;
    Ok(TestCaseName {
        id: captures[1].to_string(),
        revision_tag: captures[2].to_string(),
        dataset_name: captures[3].to_string(),
        optional_description: captures.get(4).map(|m| m.as_str().to_string()),
    })
}

/// Checks whether `s` fits the test-case name convention.
pub fn is_test_case_name(s: &str) -> bool {
    test_case_name_regex().is_match(s)
}

/// Returns the id following `id`, zero-padded to [`ID_LEN`] digits.
///
/// Wraps at `10^ID_LEN` back to 1; the all-zero id is reserved as the
/// "no existing ids" sentinel and is never produced.
pub fn increment_id(id: &str) -> Result<String, NamingError> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NamingError::InvalidId(id.to_string()));
    }
    let modulus = 10u32.pow(ID_LEN as u32);
    // Only the trailing ID_LEN digits matter modulo 10^ID_LEN, and they are
    // guaranteed to fit in a u32.
    let tail = &id[id.len().saturating_sub(ID_LEN)..];
    let value: u32 = tail
        .parse()
        .map_err(|_| NamingError::InvalidId(id.to_string()))?;
    let mut next = (value + 1) % modulus;
    if next == 0 {
        next = 1;
    }
    Ok(format!("{next:0width$}", width = ID_LEN))
}

/// Returns the highest id used by any test-case-shaped entry of `directory`,
/// or the all-zero id when there is none.
///
/// Ids are fixed-width zero-padded, so the lexicographic maximum is also the
/// numeric maximum.
pub fn find_highest_id(directory: &Path) -> io::Result<String> {
    let mut ids = BTreeSet::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Ok(parsed) = parse_test_case_name(name) {
            ids.insert(parsed.id);
        }
    }
    Ok(ids
        .into_iter()
        .next_back()
        .unwrap_or_else(|| "0".repeat(ID_LEN)))
}

/// Returns the next free id for `directory`.
///
/// Stateless by design: the directory is re-scanned on every call. Two
/// concurrent callers can receive the same id.
pub fn get_next_id(directory: &Path) -> io::Result<String> {
    let highest = find_highest_id(directory)?;
    increment_id(&highest).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Derives the final name of a stitched result from the parsed test-case
/// name of its output folder: `<id>_<dataset>[_<description>]_stitched.tiff`.
///
/// An empty description (name ending in a bare separator) is skipped, like
/// an absent one, so it cannot produce a double separator.
pub fn stitched_result_name(name: &TestCaseName) -> String {
    let mut components = vec![name.id.as_str(), name.dataset_name.as_str()];
    if let Some(description) = name.optional_description.as_deref() {
        if !description.is_empty() {
            components.push(description);
        }
    }
    components.push("stitched.tiff");
    components.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_camel_case_removes_all_forbidden_symbols() {
        let non_camel_case = "one_two.three_four five six-seven.height-nine";
        assert_eq!(
            camel_case(non_camel_case).unwrap(),
            "oneTwoThreeFourFiveSixSevenHeightNine"
        );
    }

    #[test]
    fn test_camel_case_is_idempotent_on_single_words() {
        assert_eq!(camel_case("word").unwrap(), "word");
        assert_eq!(camel_case("MyWord").unwrap(), "MyWord");
    }

    #[test]
    fn test_camel_case_keeps_inner_capitals() {
        // Only the first letter of a component is forced up; the rest stays.
        assert_eq!(camel_case("my_WORD").unwrap(), "myWORD");
    }

    #[test]
    fn test_camel_case_rejects_empty_and_separator_led_input() {
        assert_eq!(camel_case(""), Err(NamingError::EmptyComponent));
        assert_eq!(camel_case("_tail"), Err(NamingError::EmptyComponent));
        assert_eq!(camel_case(" leading space"), Err(NamingError::EmptyComponent));
    }

    #[test]
    fn test_create_test_case_name_without_description() {
        assert_eq!(
            create_test_case_name("001", "1234567890", "snowy_Hillside", None).unwrap(),
            "001_1234567890_snowyHillside"
        );
    }

    #[test]
    fn test_create_test_case_name_with_description() {
        assert_eq!(
            create_test_case_name(
                "001",
                "1234567890",
                "snowy_Hillside",
                Some("increasedStepSizeTo42")
            )
            .unwrap(),
            "001_1234567890_snowyHillside_increasedStepSizeTo42"
        );
    }

    #[test]
    fn test_parse_round_trips_created_names() {
        let name = create_test_case_name("042", "abc123", "rollingMountain", None).unwrap();
        let parsed = parse_test_case_name(&name).unwrap();
        assert_eq!(
            parsed,
            TestCaseName {
                id: "042".to_string(),
                revision_tag: "abc123".to_string(),
                dataset_name: "rollingMountain".to_string(),
                optional_description: None,
            }
        );
    }

    #[test]
    fn test_parse_round_trips_description() {
        let name =
            create_test_case_name("042", "abc123", "rollingMountain", Some("with tweaks")).unwrap();
        let parsed = parse_test_case_name(&name).unwrap();
        assert_eq!(parsed.optional_description.as_deref(), Some("withTweaks"));
    }

    #[test]
    fn test_parse_distinguishes_empty_and_absent_description() {
        let absent = parse_test_case_name("001_abc_dataset").unwrap();
        assert_eq!(absent.optional_description, None);

        let empty = parse_test_case_name("001_abc_dataset_").unwrap();
        assert_eq!(empty.optional_description.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_rejects_garbage_suffix() {
        assert!(matches!(
            parse_test_case_name("001_abc_dataset_stitched.tiff"),
            Err(NamingError::NotATestCaseName(_))
        ));
    }

    #[test]
    fn test_is_test_case_name() {
        assert!(is_test_case_name(
            "001_1234567890_snowyHillside_increasedStepSizeTo42"
        ));
        assert!(is_test_case_name("001_abc_dataset"));
        assert!(!is_test_case_name("log.txt"));
        assert!(!is_test_case_name("001_only"));
        assert!(!is_test_case_name("_abc_dataset"));
    }

    #[test]
    fn test_increment_id_pads_and_counts() {
        assert_eq!(increment_id("000").unwrap(), "001");
        assert_eq!(increment_id("009").unwrap(), "010");
        assert_eq!(increment_id("099").unwrap(), "100");
    }

    #[test]
    fn test_increment_id_wraps_past_zero() {
        // The all-zero id is reserved, so 999 wraps to 001.
        assert_eq!(increment_id("999").unwrap(), "001");
    }

    #[test]
    fn test_increment_id_uses_modular_arithmetic_for_long_ids() {
        assert_eq!(increment_id("12345").unwrap(), "346");
    }

    #[test]
    fn test_increment_id_rejects_non_numeric_input() {
        assert!(matches!(
            increment_id("abc"),
            Err(NamingError::InvalidId(_))
        ));
        assert!(matches!(increment_id(""), Err(NamingError::InvalidId(_))));
    }

    #[test]
    fn test_find_highest_id_returns_zero_id_for_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_highest_id(dir.path()).unwrap(), "000");
    }

    #[test]
    fn test_find_highest_id_ignores_entries_that_are_not_test_cases() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("not a test case")).unwrap();
        std::fs::write(dir.path().join("log.txt"), "").unwrap();
        assert_eq!(find_highest_id(dir.path()).unwrap(), "000");
    }

    #[test]
    fn test_get_next_id_skips_gaps() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("001_1234_project1_userDescription")).unwrap();
        std::fs::create_dir(dir.path().join("003_1234_project1_userDescription")).unwrap();
        assert_eq!(get_next_id(dir.path()).unwrap(), "004");
    }

    #[test]
    fn test_get_next_id_starts_at_one() {
        let dir = TempDir::new().unwrap();
        assert_eq!(get_next_id(dir.path()).unwrap(), "001");
    }

    #[test]
    fn test_stitched_result_name_with_description() {
        let parsed =
            parse_test_case_name("001_1234567890_snowyHillside_increasedStepSizeTo42").unwrap();
        assert_eq!(
            stitched_result_name(&parsed),
            "001_snowyHillside_increasedStepSizeTo42_stitched.tiff"
        );
    }

    #[test]
    fn test_stitched_result_name_without_description() {
        let parsed = parse_test_case_name("001_1234567890_snowyHillside").unwrap();
        assert_eq!(
            stitched_result_name(&parsed),
            "001_snowyHillside_stitched.tiff"
        );
    }

    #[test]
    fn test_stitched_result_name_skips_empty_description() {
        let parsed = parse_test_case_name("001_1234567890_snowyHillside_").unwrap();
        assert_eq!(
            stitched_result_name(&parsed),
            "001_snowyHillside_stitched.tiff"
        );
    }
}
