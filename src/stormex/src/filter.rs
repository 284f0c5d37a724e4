//! Literal match predicates over entry metadata.

use crate::backend::EntryMetadata;

/// What to match during a scan.
///
/// `path_substring` gates on the full archive path; `name_pattern` and
/// `extension` refine on the bare filename. All matching is literal and
/// case-sensitive; no globs, no regex.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// Literal substring the full path must contain.
    pub path_substring: String,
    /// Literal substring the filename must contain, if set.
    pub name_pattern: Option<String>,
    /// Suffix the filename must end with, if set.
    pub extension: Option<String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            // Archive paths always contain a separator, so "/" matches
            // nearly everything.
            path_substring: "/".to_string(),
            name_pattern: None,
            extension: None,
        }
    }
}

/// Decide whether one entry satisfies the criteria.
///
/// The path gate applies first; the finer filters are each skipped when
/// absent and must both hold when both are present.
pub fn matches(entry: &EntryMetadata, criteria: &SearchCriteria) -> bool {
    if !entry.full_path.contains(&criteria.path_substring) {
        return false;
    }

    let name_ok = criteria
        .name_pattern
        .as_deref()
        .map_or(true, |pattern| entry.plain_name.contains(pattern));
    let ext_ok = criteria
        .extension
        .as_deref()
        .map_or(true, |ext| has_extension(&entry.plain_name, ext));

    name_ok && ext_ok
}

/// Byte-exact suffix test. A name no longer than the extension never
/// matches, so there is no out-of-range comparison.
fn has_extension(filename: &str, extension: &str) -> bool {
    filename.len() > extension.len() && filename.ends_with(extension)
}
