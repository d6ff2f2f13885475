use smell_prep_core::{LabelStats, SampleStats};

use crate::json::{JsonLabelReport, JsonResolution, JsonSampleReport};

pub(crate) fn format_resolution(resolution: &JsonResolution) -> String {
    match (resolution.path.as_deref(), resolution.phase) {
        (Some(path), Some(phase)) => format!("{path}\n(found in {phase} phase)\n"),
        _ => match (&resolution.project_root, &resolution.filename) {
            (Some(root), _) => format!("project directory not found: {root}\n"),
            (_, Some(filename)) => format!("class file not found: {filename}\n"),
            _ => "not found\n".to_string(),
        },
    }
}

pub(crate) fn format_sample_stats(stats: &SampleStats) -> String {
    let mut out = String::new();
    out.push_str("== sample stats ==\n");
    out.push_str(&format!(
        "rows={} kept={} located={} sampled={} copied={}\n",
        stats.rows_read, stats.rows_kept, stats.located, stats.sampled, stats.copied
    ));

    let mut failures: Vec<(&str, u64)> = vec![
        ("missing_projects", stats.missing_projects),
        ("classes_not_found", stats.classes_not_found),
        ("copy_failures", stats.copy_failures),
    ];
    failures.retain(|(_, v)| *v > 0);
    if !failures.is_empty() {
        out.push_str("failed:\n");
        for (k, v) in failures {
            out.push_str(&format!("- {k}={v}\n"));
        }
    }
    out.push('\n');
    out
}

pub(crate) fn format_label_stats(stats: &LabelStats) -> String {
    let mut out = String::new();
    out.push_str("== label stats ==\n");
    out.push_str(&format!(
        "matched={} written={} unmatched={}\n",
        stats.pairs_matched, stats.pairs_written, stats.unmatched_files
    ));
    if stats.failures() > 0 {
        out.push_str("failed:\n");
        if stats.read_failures > 0 {
            out.push_str(&format!("- read_failures={}\n", stats.read_failures));
        }
        if stats.write_failures > 0 {
            out.push_str(&format!("- write_failures={}\n", stats.write_failures));
        }
    }
    out.push('\n');
    out
}

pub(crate) fn format_sample(report: &JsonSampleReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "smell types: {} (destination: {})\n",
        report.categories.len(),
        report.destination
    ));
    for category in &report.categories {
        out.push('\n');
        out.push_str(&format!(
            "{} files={}\n",
            category.smell_type,
            category.files.len()
        ));
        for file in &category.files {
            out.push_str(&format!("- {file}\n"));
        }
    }
    out.push('\n');
    out
}

pub(crate) fn format_labels(report: &JsonLabelReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("categories: {}\n", report.categories.len()));
    for category in &report.categories {
        out.push('\n');
        out.push_str(&format!(
            "{} pairs={} manifest={}\n",
            category.category,
            category.pairs.len(),
            category.manifest
        ));
        out.push_str(&format!(
            "- original={}\n- refactored={}\n",
            category.original_dir, category.refactored_dir
        ));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stats_only_list_nonzero_failures() {
        let stats = SampleStats {
            rows_read: 10,
            rows_kept: 8,
            located: 6,
            classes_not_found: 2,
            sampled: 6,
            copied: 6,
            ..SampleStats::default()
        };
        let text = format_sample_stats(&stats);
        assert!(text.contains("rows=10 kept=8 located=6 sampled=6 copied=6"));
        assert!(text.contains("- classes_not_found=2"));
        assert!(!text.contains("missing_projects"));
    }

    #[test]
    fn clean_label_stats_have_no_failure_section() {
        let stats = LabelStats {
            pairs_matched: 3,
            pairs_written: 3,
            ..LabelStats::default()
        };
        let text = format_label_stats(&stats);
        assert_eq!(text, "== label stats ==\nmatched=3 written=3 unmatched=0\n\n");
    }

    #[test]
    fn unresolved_class_names_the_file() {
        let resolution = JsonResolution {
            status: "notFound",
            path: None,
            phase: None,
            project_root: None,
            filename: Some("Tool.java".to_string()),
        };
        assert_eq!(
            format_resolution(&resolution),
            "class file not found: Tool.java\n"
        );
    }
}
