use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::error::{PrepError, Result};
use crate::log::RunLog;
use crate::resolve::{Resolution, resolve_class};
use crate::types::{LocatedFile, Outcome, SampleOptions, SampleStats, SmellRow};
use crate::util::{file_name_lossy, seeded_rng};

/// Category name -> rows, iterated in name order.
pub type SmellSheets = BTreeMap<String, Vec<SmellRow>>;

/// Rows at or below this severity are not worth sampling.
pub const MIN_SEVERITY_EXCLUSIVE: f64 = 1.0;

/// Reads exported sheets (`{ "<category>": [ <row>, ... ] }`) and keeps the
/// rows with `severity > 1`.
pub fn load_smell_sheets(path: &Path, stats: &mut SampleStats) -> Result<SmellSheets> {
    let raw = fs::read_to_string(path).map_err(|source| PrepError::FileReadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let mut sheets: SmellSheets = serde_json::from_str(&raw)
        .map_err(|e| PrepError::InvalidInput(format!("sheets {}: {e}", path.display())))?;

    for rows in sheets.values_mut() {
        stats.rows_read += rows.len() as u64;
        rows.retain(|row| row.severity > MIN_SEVERITY_EXCLUSIVE);
        stats.rows_kept += rows.len() as u64;
    }
    Ok(sheets)
}

/// Resolves every row and draws up to `max_files` distinct files per
/// category, uniformly and without replacement.
pub fn select_random_sample<R: Rng>(
    sheets: &SmellSheets,
    base_dir: &Path,
    options: &SampleOptions,
    rng: &mut R,
    log: &mut RunLog,
    stats: &mut SampleStats,
) -> BTreeMap<String, Vec<LocatedFile>> {
    let mut selected = BTreeMap::new();

    for (smell_type, rows) in sheets {
        log.progress(&format!("--> Selecting files for code smell type: {smell_type}"));

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut valid: Vec<LocatedFile> = Vec::new();
        for row in rows {
            let resolution = resolve_class(
                base_dir,
                &row.project,
                &row.package,
                &row.complextype,
                &options.resolve,
                log,
            );
            match resolution {
                Resolution::Found { path, .. } => {
                    stats.located += 1;
                    // Inner classes of one outer class share a file.
                    if seen.insert(path.clone()) {
                        valid.push(LocatedFile {
                            project: row.project.clone(),
                            package: row.package.clone(),
                            qualified_name: row.complextype.clone(),
                            path: Some(path),
                        });
                    }
                }
                Resolution::MissingProject { .. } => stats.missing_projects += 1,
                Resolution::NotFoundAnywhere { .. } => stats.classes_not_found += 1,
            }
        }

        let amount = options.max_files.min(valid.len());
        let sample: Vec<LocatedFile> = valid.choose_multiple(rng, amount).cloned().collect();
        stats.sampled += sample.len() as u64;
        selected.insert(smell_type.clone(), sample);
    }

    selected
}

pub fn category_dir_name(smell_type: &str) -> String {
    smell_type.replace(' ', "_")
}

/// Copies each sampled file to `<destination>/<category>/<project>_<File>.java`.
pub fn copy_files_to_destination(
    selected: &BTreeMap<String, Vec<LocatedFile>>,
    destination: &Path,
    log: &mut RunLog,
    stats: &mut SampleStats,
) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    fs::create_dir_all(destination).map_err(|source| PrepError::FileWriteFailure {
        path: destination.to_path_buf(),
        source,
    })?;

    let mut copied = BTreeMap::new();
    for (smell_type, files) in selected {
        let smell_folder = destination.join(category_dir_name(smell_type));
        if let Err(source) = fs::create_dir_all(&smell_folder) {
            log.error(&PrepError::FileWriteFailure {
                path: smell_folder,
                source,
            });
            stats.copy_failures += files.len() as u64;
            continue;
        }

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let Some(source_path) = file.path.as_deref() else {
                continue;
            };
            let dest_path = smell_folder.join(format!(
                "{}_{}",
                file.project,
                file_name_lossy(source_path)
            ));
            match fs::copy(source_path, &dest_path) {
                Ok(_) => {
                    info!("Copied: {} → {}", source_path.display(), dest_path.display());
                    stats.copied += 1;
                    written.push(dest_path);
                }
                Err(source) => {
                    log.error(&PrepError::FileWriteFailure {
                        path: dest_path,
                        source,
                    });
                    stats.copy_failures += 1;
                }
            }
        }
        copied.insert(smell_type.clone(), written);
    }

    Ok(copied)
}

/// Load, resolve, sample and copy in one pass.
pub fn sample_and_copy(
    sheets_path: &Path,
    base_dir: &Path,
    destination: &Path,
    options: &SampleOptions,
    log: &mut RunLog,
) -> Result<Outcome<BTreeMap<String, Vec<PathBuf>>, SampleStats>> {
    let mut stats = SampleStats::default();
    let sheets = load_smell_sheets(sheets_path, &mut stats)?;
    let mut rng = seeded_rng(options.seed);
    let selected = select_random_sample(&sheets, base_dir, options, &mut rng, log, &mut stats);
    let copied = copy_files_to_destination(&selected, destination, log, &mut stats)?;
    Ok(Outcome {
        result: copied,
        stats,
    })
}
