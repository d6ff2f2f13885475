use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use smell_prep_core::{CategoryLabels, LabelStats, Resolution, SampleStats, SearchPhase};

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonResolution {
    pub(crate) status: &'static str,
    pub(crate) path: Option<String>,
    pub(crate) phase: Option<&'static str>,
    pub(crate) project_root: Option<String>,
    pub(crate) filename: Option<String>,
}

impl From<&Resolution> for JsonResolution {
    fn from(resolution: &Resolution) -> Self {
        match resolution {
            Resolution::Found { path, phase } => Self {
                status: "found",
                path: Some(display(path)),
                phase: Some(match phase {
                    SearchPhase::Package => "package",
                    SearchPhase::Project => "project",
                }),
                project_root: None,
                filename: None,
            },
            Resolution::MissingProject { root } => Self {
                status: "missingProject",
                path: None,
                phase: None,
                project_root: Some(display(root)),
                filename: None,
            },
            Resolution::NotFoundAnywhere { filename } => Self {
                status: "notFound",
                path: None,
                phase: None,
                project_root: None,
                filename: Some(filename.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSampleStats {
    pub(crate) rows_read: u64,
    pub(crate) rows_kept: u64,
    pub(crate) located: u64,
    pub(crate) missing_projects: u64,
    pub(crate) classes_not_found: u64,
    pub(crate) sampled: u64,
    pub(crate) copied: u64,
    pub(crate) copy_failures: u64,
}

impl From<&SampleStats> for JsonSampleStats {
    fn from(stats: &SampleStats) -> Self {
        Self {
            rows_read: stats.rows_read,
            rows_kept: stats.rows_kept,
            located: stats.located,
            missing_projects: stats.missing_projects,
            classes_not_found: stats.classes_not_found,
            sampled: stats.sampled,
            copied: stats.copied,
            copy_failures: stats.copy_failures,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSampleCategory {
    pub(crate) smell_type: String,
    pub(crate) files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSampleReport {
    pub(crate) destination: String,
    pub(crate) categories: Vec<JsonSampleCategory>,
    pub(crate) stats: JsonSampleStats,
}

pub(crate) fn map_sample(
    destination: &Path,
    copied: &BTreeMap<String, Vec<PathBuf>>,
    stats: &SampleStats,
) -> JsonSampleReport {
    JsonSampleReport {
        destination: display(destination),
        categories: copied
            .iter()
            .map(|(smell_type, files)| JsonSampleCategory {
                smell_type: smell_type.clone(),
                files: files.iter().map(|p| display(p)).collect(),
            })
            .collect(),
        stats: stats.into(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonLabelStats {
    pub(crate) pairs_matched: u64,
    pub(crate) pairs_written: u64,
    pub(crate) unmatched_files: u64,
    pub(crate) read_failures: u64,
    pub(crate) write_failures: u64,
}

impl From<&LabelStats> for JsonLabelStats {
    fn from(stats: &LabelStats) -> Self {
        Self {
            pairs_matched: stats.pairs_matched,
            pairs_written: stats.pairs_written,
            unmatched_files: stats.unmatched_files,
            read_failures: stats.read_failures,
            write_failures: stats.write_failures,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonLabeledPair {
    pub(crate) base_name: String,
    pub(crate) file_a: String,
    pub(crate) file_b: String,
    pub(crate) version_a: String,
    pub(crate) version_b: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonCategoryLabels {
    pub(crate) category: String,
    pub(crate) original_dir: String,
    pub(crate) refactored_dir: String,
    pub(crate) output_dir: String,
    pub(crate) manifest: String,
    pub(crate) pairs: Vec<JsonLabeledPair>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonLabelReport {
    pub(crate) categories: Vec<JsonCategoryLabels>,
    pub(crate) stats: JsonLabelStats,
}

pub(crate) fn map_labels(categories: &[CategoryLabels], stats: &LabelStats) -> JsonLabelReport {
    JsonLabelReport {
        categories: categories
            .iter()
            .map(|c| JsonCategoryLabels {
                category: c.category.clone(),
                original_dir: display(&c.original_dir),
                refactored_dir: display(&c.refactored_dir),
                output_dir: display(&c.output_dir),
                manifest: display(&c.manifest),
                pairs: c
                    .pairs
                    .iter()
                    .map(|p| JsonLabeledPair {
                        base_name: p.base_name.clone(),
                        file_a: display(&p.path_a),
                        file_b: display(&p.path_b),
                        version_a: display(&p.source_a),
                        version_b: display(&p.source_b),
                    })
                    .collect(),
            })
            .collect(),
        stats: stats.into(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSanitized {
    pub(crate) file: String,
    pub(crate) source: String,
}

pub(crate) fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::other(format!("json encode: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_serializes_camel_case() {
        let found = Resolution::Found {
            path: PathBuf::from("/s/antlr/antlr-2.7.2/src/org/antlr/Tool.java"),
            phase: SearchPhase::Package,
        };
        let value = serde_json::to_value(JsonResolution::from(&found)).unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["phase"], "package");
        assert!(value["projectRoot"].is_null());

        let missing = Resolution::MissingProject {
            root: PathBuf::from("/s/nope/nope-1.0"),
        };
        let value = serde_json::to_value(JsonResolution::from(&missing)).unwrap();
        assert_eq!(value["status"], "missingProject");
        assert_eq!(value["projectRoot"], "/s/nope/nope-1.0");
    }

    #[test]
    fn sample_report_lists_categories_in_order() {
        let copied: BTreeMap<String, Vec<PathBuf>> = [
            ("Long Method".to_string(), vec![PathBuf::from("d/Long_Method/p_X.java")]),
            ("God Class".to_string(), vec![]),
        ]
        .into_iter()
        .collect();
        let stats = SampleStats {
            copied: 1,
            ..SampleStats::default()
        };
        let value =
            serde_json::to_value(map_sample(Path::new("d"), &copied, &stats)).unwrap();
        assert_eq!(value["categories"][0]["smellType"], "God Class");
        assert_eq!(value["categories"][1]["files"][0], "d/Long_Method/p_X.java");
        assert_eq!(value["stats"]["copyFailures"], 0);
        assert_eq!(value["stats"]["copied"], 1);
    }
}
