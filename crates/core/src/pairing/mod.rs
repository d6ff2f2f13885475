//! Pairing original and refactored files, sanitizing them, and writing them
//! back out under randomly assigned `A`/`B` labels.
//!
//! The label order is shuffled per pair so a reader cannot tell which
//! variant is the refactored one from its position. Runs are reproducible
//! only when a seed is supplied.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::error::{PrepError, Result};
use crate::log::RunLog;
use crate::sanitize::sanitize_java_source;
use crate::types::{
    JAVA_EXTENSION, LabelOptions, LabelStats, LabeledPair, MatchedFiles, Outcome, Role,
    SourcePair,
};
use crate::util::{file_name_lossy, seeded_rng};

mod manifest;


pub use manifest::MANIFEST_TITLE;
use manifest::Manifest;

fn java_file_names(dir: &Path) -> Result<BTreeSet<String>> {
    let entries = fs::read_dir(dir).map_err(|err| {
        PrepError::InvalidInput(format!("cannot list {}: {err}", dir.display()))
    })?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!("skipping non-UTF-8 name in {}", dir.display());
            continue;
        };
        if name.ends_with(JAVA_EXTENSION) {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Files present under the same name in both directories, sorted by name,
/// plus the number of `.java` files that had no counterpart.
pub fn match_java_files(dir1: &Path, dir2: &Path) -> Result<(Vec<MatchedFiles>, u64)> {
    let names1 = java_file_names(dir1)?;
    let names2 = java_file_names(dir2)?;

    let unmatched = names1.symmetric_difference(&names2).count() as u64;
    let pairs = names1
        .intersection(&names2)
        .map(|name| MatchedFiles {
            base_name: Path::new(name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone()),
            first: dir1.join(name),
            second: dir2.join(name),
        })
        .collect();
    Ok((pairs, unmatched))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PrepError::FileReadFailure {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_and_sanitize(files: &MatchedFiles) -> Result<SourcePair> {
    let first = read_source(&files.first)?;
    let second = read_source(&files.second)?;
    Ok(SourcePair {
        base_name: files.base_name.clone(),
        first: sanitize_java_source(&first),
        second: sanitize_java_source(&second),
    })
}

pub fn variant_path(output_dir: &Path, base_name: &str, role: Role) -> PathBuf {
    output_dir.join(format!("{base_name}_{}{JAVA_EXTENSION}", role.suffix()))
}

fn write_variant(output_dir: &Path, base_name: &str, role: Role, content: &str) -> Result<PathBuf> {
    let path = variant_path(output_dir, base_name, role);
    fs::write(&path, content).map_err(|source| PrepError::FileWriteFailure {
        path: path.clone(),
        source,
    })?;
    debug!("sanitized Java file saved: {}", path.display());
    Ok(path)
}

/// Flips a fair coin for which variant becomes `A`, then writes
/// `<base>_A.java` and `<base>_B.java` into `output_dir`.
pub fn label_pair<R: Rng>(
    pair: &SourcePair,
    first_dir: &Path,
    second_dir: &Path,
    output_dir: &Path,
    rng: &mut R,
) -> Result<LabeledPair> {
    let (content_a, content_b, source_a, source_b) = if rng.gen_bool(0.5) {
        (&pair.first, &pair.second, first_dir, second_dir)
    } else {
        (&pair.second, &pair.first, second_dir, first_dir)
    };

    let path_a = write_variant(output_dir, &pair.base_name, Role::A, content_a)?;
    let path_b = match write_variant(output_dir, &pair.base_name, Role::B, content_b) {
        Ok(path) => path,
        Err(err) => {
            // No `_A` without its `_B`.
            if let Err(rm) = fs::remove_file(&path_a) {
                debug!("could not remove {}: {rm}", path_a.display());
            }
            return Err(err);
        }
    };

    Ok(LabeledPair {
        base_name: pair.base_name.clone(),
        path_a,
        path_b,
        source_a: source_a.to_path_buf(),
        source_b: source_b.to_path_buf(),
    })
}

/// Pairs `dir1` with `dir2`, writes labeled variants into `output_dir` and
/// records every written pair in the markdown manifest at `manifest_path`.
///
/// Unreadable or unwritable pairs and failed manifest rows are logged and
/// skipped; only failing to list the inputs or to create the outputs aborts.
pub fn pair_and_label<R: Rng>(
    dir1: &Path,
    dir2: &Path,
    output_dir: &Path,
    manifest_path: &Path,
    rng: &mut R,
    log: &mut RunLog,
) -> Result<Outcome<Vec<LabeledPair>, LabelStats>> {
    let (matched, unmatched) = match_java_files(dir1, dir2)?;
    let mut stats = LabelStats {
        pairs_matched: matched.len() as u64,
        unmatched_files: unmatched,
        ..LabelStats::default()
    };
    if unmatched > 0 {
        debug!(
            "{unmatched} files in {} / {} have no counterpart",
            dir1.display(),
            dir2.display()
        );
    }

    fs::create_dir_all(output_dir).map_err(|source| PrepError::FileWriteFailure {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let mut manifest = Manifest::create(manifest_path)?;

    let mut labeled = Vec::with_capacity(matched.len());
    for files in &matched {
        let pair = match read_and_sanitize(files) {
            Ok(pair) => pair,
            Err(err) if err.is_recoverable() => {
                log.error(&err);
                stats.read_failures += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let pair = match label_pair(&pair, dir1, dir2, output_dir, rng) {
            Ok(pair) => pair,
            Err(err) if err.is_recoverable() => {
                log.error(&err);
                stats.write_failures += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Err(err) = manifest.append(&pair) {
            log.error(&err);
            stats.write_failures += 1;
            continue;
        }
        stats.pairs_written += 1;
        labeled.push(pair);
    }

    Ok(Outcome {
        result: labeled,
        stats,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabels {
    pub category: String,
    pub original_dir: PathBuf,
    pub refactored_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest: PathBuf,
    pub pairs: Vec<LabeledPair>,
}

/// `dataset-god-class` -> `dataset-god-class-r` for suffix `-r`.
pub fn refactored_sibling(dir: &Path, suffix: &str) -> PathBuf {
    let Some(name) = dir.file_name() else {
        let mut raw: OsString = dir.as_os_str().to_os_string();
        raw.push(suffix);
        return PathBuf::from(raw);
    };
    let mut sibling = name.to_os_string();
    sibling.push(suffix);
    dir.with_file_name(sibling)
}

pub(crate) fn validate_dirs(dirs: &[PathBuf]) -> Result<()> {
    for dir in dirs {
        let meta = fs::metadata(dir)
            .map_err(|err| PrepError::InvalidInput(format!("{}: {err}", dir.display())))?;
        if !meta.is_dir() {
            return Err(PrepError::InvalidInput(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    }
    Ok(())
}

/// Labels every category directory against its `<dir><suffix>` sibling.
/// Output for category `name` goes to `<out_dir>/<name>/` with the manifest
/// at `<out_dir>/<name>.md`.
pub fn label_categories(
    category_dirs: &[PathBuf],
    out_dir: &Path,
    options: &LabelOptions,
    log: &mut RunLog,
) -> Result<Outcome<Vec<CategoryLabels>, LabelStats>> {
    let siblings: Vec<PathBuf> = category_dirs
        .iter()
        .map(|dir| refactored_sibling(dir, &options.refactored_suffix))
        .collect();
    validate_dirs(category_dirs)?;
    validate_dirs(&siblings)?;

    let mut rng = seeded_rng(options.seed);
    let mut stats = LabelStats::default();
    let mut categories = Vec::with_capacity(category_dirs.len());

    for (original_dir, refactored_dir) in category_dirs.iter().zip(siblings) {
        let category = file_name_lossy(original_dir);
        log.progress(&format!("--> Labeling pairs for: {category}"));

        let output_dir = out_dir.join(&category);
        let manifest = out_dir.join(format!("{category}.md"));
        let outcome = pair_and_label(
            original_dir,
            &refactored_dir,
            &output_dir,
            &manifest,
            &mut rng,
            log,
        )?;
        stats.absorb(&outcome.stats);

        categories.push(CategoryLabels {
            category,
            original_dir: original_dir.clone(),
            refactored_dir,
            output_dir,
            manifest,
            pairs: outcome.result,
        });
    }

    Ok(Outcome {
        result: categories,
        stats,
    })
}
