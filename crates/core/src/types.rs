use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PrepError, Result};

pub const JAVA_EXTENSION: &str = ".java";
pub const DEFAULT_MAX_FILES_PER_SMELL: usize = 20;
pub const DEFAULT_LOG_FILE: &str = "log_errors.txt";
pub const DEFAULT_REFACTORED_SUFFIX: &str = "-r";

/// Qualified class name -> literal file name, for classes the heuristic
/// cannot map (anonymous and oddly nested types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualOverrides {
    entries: HashMap<String, String>,
}

impl Default for ManualOverrides {
    fn default() -> Self {
        let entries = [("org.lnicholls.galleon.apps.email.Email$3", "Email.java")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { entries }
    }
}

impl ManualOverrides {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.entries.get(qualified_name).map(String::as_str)
    }

    pub fn insert(&mut self, qualified_name: impl Into<String>, filename: impl Into<String>) {
        self.entries.insert(qualified_name.into(), filename.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges a JSON object of `{ "qualified.Name": "File.java" }` on top of
    /// the current entries.
    pub fn merge_json_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path).map_err(|source| PrepError::FileReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            PrepError::InvalidInput(format!("overrides {}: {e}", path.display()))
        })?;
        self.entries.extend(parsed);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub overrides: ManualOverrides,
}

#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub resolve: ResolveOptions,
    pub max_files: usize,
    pub seed: Option<u64>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            max_files: DEFAULT_MAX_FILES_PER_SMELL,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelOptions {
    pub refactored_suffix: String,
    pub seed: Option<u64>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            refactored_suffix: DEFAULT_REFACTORED_SUFFIX.to_string(),
            seed: None,
        }
    }
}

/// One row of an exported smell sheet. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmellRow {
    pub severity: f64,
    pub project: String,
    pub package: String,
    pub complextype: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFile {
    pub project: String,
    pub package: String,
    pub qualified_name: String,
    pub path: Option<PathBuf>,
}

/// Two same-named files found in both input directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFiles {
    pub base_name: String,
    pub first: PathBuf,
    pub second: PathBuf,
}

/// Sanitized contents of a matched pair, in input-directory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePair {
    pub base_name: String,
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    A,
    B,
}

impl Role {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPair {
    pub base_name: String,
    pub path_a: PathBuf,
    pub path_b: PathBuf,
    /// Directory the A content was read from.
    pub source_a: PathBuf,
    pub source_b: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SampleStats {
    pub rows_read: u64,
    pub rows_kept: u64,
    pub located: u64,
    pub missing_projects: u64,
    pub classes_not_found: u64,
    pub sampled: u64,
    pub copied: u64,
    pub copy_failures: u64,
}

impl SampleStats {
    pub fn failures(&self) -> u64 {
        self.missing_projects
            .saturating_add(self.classes_not_found)
            .saturating_add(self.copy_failures)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelStats {
    pub pairs_matched: u64,
    pub pairs_written: u64,
    pub unmatched_files: u64,
    pub read_failures: u64,
    pub write_failures: u64,
}

impl LabelStats {
    pub fn failures(&self) -> u64 {
        self.read_failures.saturating_add(self.write_failures)
    }

    pub(crate) fn absorb(&mut self, other: &LabelStats) {
        self.pairs_matched += other.pairs_matched;
        self.pairs_written += other.pairs_written;
        self.unmatched_files += other.unmatched_files;
        self.read_failures += other.read_failures;
        self.write_failures += other.write_failures;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T, S> {
    pub result: T,
    pub stats: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL_INNER: &str = "org.lnicholls.galleon.apps.email.Email$3";

    #[test]
    fn file_entries_win_over_builtins() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("overrides.json");
        fs::write(
            &path,
            r#"{
                "org.lnicholls.galleon.apps.email.Email$3": "EmailApp.java",
                "org.jhotdraw.util.Geom$1": "Geom.java"
            }"#,
        )?;

        let mut overrides = ManualOverrides::default();
        assert_eq!(overrides.get(EMAIL_INNER), Some("Email.java"));
        overrides.merge_json_file(&path)?;

        assert_eq!(overrides.get(EMAIL_INNER), Some("EmailApp.java"));
        assert_eq!(overrides.get("org.jhotdraw.util.Geom$1"), Some("Geom.java"));
        assert_eq!(overrides.len(), 2);
        Ok(())
    }

    #[test]
    fn malformed_overrides_are_invalid_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("overrides.json");
        fs::write(&path, r#"{ "a.B$1": 3 }"#)?;

        let mut overrides = ManualOverrides::empty();
        let err = overrides.merge_json_file(&path).unwrap_err();
        assert!(matches!(err, PrepError::InvalidInput(_)));
        assert!(overrides.is_empty());

        let missing = overrides
            .merge_json_file(&dir.path().join("absent.json"))
            .unwrap_err();
        assert!(matches!(missing, PrepError::FileReadFailure { .. }));
        Ok(())
    }
}
