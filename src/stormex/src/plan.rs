//! Destination path planning.
//!
//! Maps an archive-internal path onto the output root: separator
//! normalization, optional flattening and lowercasing, and the ordered
//! directory chain that has to exist before the entry can be written. The
//! derivations are pure string work over immutable inputs; the only
//! filesystem side effect lives in [`create_directory_chain`].

use std::fs;
use std::io;

use crate::backend::plain_name_of;
use crate::Error;

/// How destinations are derived from archive paths.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    output_root: String,
    preserve_hierarchy: bool,
    lowercase: bool,
}

impl PlanConfig {
    /// The output root is normalized to end with exactly one separator; an
    /// empty root means the current directory.
    pub fn new(output_root: impl Into<String>) -> Self {
        let mut root: String = output_root.into();
        while root.ends_with('/') || root.ends_with('\\') {
            root.pop();
        }
        if root.is_empty() {
            root.push('.');
        }
        root.push('/');
        Self {
            output_root: root,
            preserve_hierarchy: false,
            lowercase: false,
        }
    }

    /// Reproduce the archive's directory structure under the root instead
    /// of flattening to bare filenames.
    pub fn preserve_hierarchy(mut self, on: bool) -> Self {
        self.preserve_hierarchy = on;
        self
    }

    /// Fold destination paths to lowercase.
    pub fn lowercase(mut self, on: bool) -> Self {
        self.lowercase = on;
        self
    }

    pub fn output_root(&self) -> &str {
        &self.output_root
    }
}

/// Destination for one entry: the final file path and every directory that
/// must exist above it, shallowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub normalized_path: String,
    pub directory_chain: Vec<String>,
}

/// Derive the destination for one archive path.
///
/// Archive paths whose `..` segments would climb out of the output root
/// are rejected rather than trusting the container to never produce them.
/// The output root itself is trusted caller input and may be relative.
pub fn plan(full_path: &str, config: &PlanConfig) -> Result<DestinationPlan, Error> {
    let selected = if config.preserve_hierarchy {
        full_path.to_string()
    } else {
        plain_name_of(full_path).to_string()
    };
    let selected = if config.lowercase {
        selected.to_lowercase()
    } else {
        selected
    };
    let selected = normalize_separators(&selected);

    if has_traversal(&selected) {
        return Err(Error::UnsafePath {
            path: full_path.to_string(),
        });
    }

    let normalized_path =
        normalize_separators(&format!("{}{}", config.output_root, selected));

    let directory_chain = directory_chain(&normalized_path);
    Ok(DestinationPlan {
        normalized_path,
        directory_chain,
    })
}

/// Replace archive-alternate separators (`\`) with `/`.
///
/// Every occurrence is rewritten in one pass, so the result is a fixed
/// point: reapplying is a no-op even for runs of alternate separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn has_traversal(normalized: &str) -> bool {
    normalized.split('/').any(|segment| segment == "..")
}

/// Every proper directory prefix of a normalized path, shallowest first,
/// excluding the final filename component.
///
/// For `out/a/b/c.txt` the chain is `["out", "out/a", "out/a/b"]`.
pub fn directory_chain(normalized: &str) -> Vec<String> {
    normalized
        .char_indices()
        .filter(|&(_, c)| c == '/')
        .map(|(idx, _)| normalized[..idx].to_string())
        .filter(|prefix| !prefix.is_empty())
        .collect()
}

/// Create every directory in the chain, shallowest first.
///
/// Already-existing directories are left untouched; any other failure
/// aborts extraction of the current entry only.
pub fn create_directory_chain(plan: &DestinationPlan) -> Result<(), Error> {
    for dir in &plan.directory_chain {
        match fs::create_dir(dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(Error::DirectoryCreate {
                    path: dir.clone(),
                    source,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_and_lowercase() {
        let config = PlanConfig::new("out").lowercase(true);
        let plan = plan("Data/Sound/Hero.OGG", &config).unwrap();

        assert_eq!(plan.normalized_path, "out/hero.ogg");
        assert_eq!(plan.directory_chain, vec!["out"]);
    }

    #[test]
    fn preserve_hierarchy_with_backslashes() {
        let config = PlanConfig::new("out/").preserve_hierarchy(true);
        let plan = plan("Data\\Sound\\Hero.ogg", &config).unwrap();

        assert_eq!(plan.normalized_path, "out/Data/Sound/Hero.ogg");
        assert_eq!(plan.directory_chain, vec!["out", "out/Data", "out/Data/Sound"]);
    }

    #[test]
    fn output_root_gets_exactly_one_separator() {
        assert_eq!(PlanConfig::new("out").output_root(), "out/");
        assert_eq!(PlanConfig::new("out/").output_root(), "out/");
        assert_eq!(PlanConfig::new("out///").output_root(), "out/");
        assert_eq!(PlanConfig::new("out\\").output_root(), "out/");
        assert_eq!(PlanConfig::new("").output_root(), "./");
    }

    #[test]
    fn separator_normalization_is_a_fixed_point() {
        let once = normalize_separators("a\\\\b\\c/d");
        let twice = normalize_separators(&once);
        assert_eq!(once, "a//b/c/d");
        assert_eq!(once, twice);
    }

    #[test]
    fn chain_of_deep_path() {
        assert_eq!(
            directory_chain("out/a/b/c.txt"),
            vec!["out", "out/a", "out/a/b"]
        );
        assert!(directory_chain("c.txt").is_empty());
    }

    #[test]
    fn traversal_segments_are_rejected() {
        let config = PlanConfig::new("out").preserve_hierarchy(true);
        assert!(matches!(
            plan("../evil.dll", &config),
            Err(Error::UnsafePath { .. })
        ));
        assert!(matches!(
            plan("a/../../evil.dll", &config),
            Err(Error::UnsafePath { .. })
        ));
        // A filename merely containing dots is fine.
        assert!(plan("a/not..traversal.txt", &config).is_ok());
    }

    #[test]
    fn parent_relative_output_root_is_allowed() {
        // Only the archive-derived portion is screened for traversal; the
        // output root is trusted caller input.
        let flat = PlanConfig::new("..");
        assert_eq!(plan("a/b.ogg", &flat).unwrap().normalized_path, "../b.ogg");

        let config = PlanConfig::new("../out").preserve_hierarchy(true);
        let plan = plan("Data/Sound/Hero.ogg", &config).unwrap();

        assert_eq!(plan.normalized_path, "../out/Data/Sound/Hero.ogg");
        assert_eq!(
            plan.directory_chain,
            vec!["..", "../out", "../out/Data", "../out/Data/Sound"]
        );
    }

    #[test]
    fn directory_chain_creation_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("out").to_string_lossy().into_owned();
        let config = PlanConfig::new(root).preserve_hierarchy(true);
        let plan = plan("Data/Sound/Hero.ogg", &config).unwrap();

        create_directory_chain(&plan).unwrap();
        create_directory_chain(&plan).unwrap();

        assert!(temp.path().join("out/Data/Sound").is_dir());
    }
}
