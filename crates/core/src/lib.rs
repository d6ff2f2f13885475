mod error;
mod log;
mod pairing;
mod resolve;
mod sample;
mod sanitize;
mod types;
mod util;

pub use error::{PrepError, Result};

pub use log::RunLog;

pub use pairing::{
    CategoryLabels, MANIFEST_TITLE, label_categories, label_pair, match_java_files,
    pair_and_label, read_and_sanitize, refactored_sibling, variant_path,
};

pub use resolve::{
    PackageSearch, Resolution, SearchPhase, class_file_name, locate_class, package_rel_path,
    project_root, resolve_class, search_package, search_project,
};

pub use sample::{
    SmellSheets, category_dir_name, copy_files_to_destination, load_smell_sheets,
    sample_and_copy, select_random_sample,
};

pub use sanitize::sanitize_java_source;

pub use types::{
    DEFAULT_LOG_FILE, DEFAULT_MAX_FILES_PER_SMELL, DEFAULT_REFACTORED_SUFFIX, JAVA_EXTENSION,
    LabelOptions, LabelStats, LabeledPair, LocatedFile, ManualOverrides, MatchedFiles, Outcome,
    ResolveOptions, Role, SampleOptions, SampleStats, SmellRow, SourcePair,
};

pub use util::seeded_rng;
