use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

/// Every directory under `root` (root included) holding a regular file named
/// `filename`, in depth-first pre-order with entries sorted by name. A
/// directory always precedes its subdirectories.
pub(crate) fn directories_containing(root: &Path, filename: &str) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut found = Vec::new();
    let mut walk_errors = 0u64;
    for result in builder.build() {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                if err
                    .io_error()
                    .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
                {
                    debug!("permission denied while walking {}: {err}", root.display());
                } else {
                    debug!("walk error under {}: {err}", root.display());
                }
                walk_errors = walk_errors.saturating_add(1);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }
        let dir = entry.into_path();
        if dir.join(filename).is_file() {
            found.push(dir);
        }
    }

    if walk_errors > 0 {
        debug!(
            "skipped {walk_errors} unreadable entries under {}",
            root.display()
        );
    }
    found
}
