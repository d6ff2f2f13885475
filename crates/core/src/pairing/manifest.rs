use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PrepError, Result};
use crate::types::LabeledPair;
use crate::util::file_name_lossy;

pub const MANIFEST_TITLE: &str = "# Sanitized Java Generation Log";

/// Markdown table recording which input directory supplied each label.
pub(crate) struct Manifest {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Manifest {
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let write_failure = |source| PrepError::FileWriteFailure {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_failure)?;
        let mut manifest = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        manifest.write_line(&format!("{MANIFEST_TITLE}\n"))?;
        manifest.write_line("| File (A) | File (B) | Version A | Version B |")?;
        manifest.write_line("|-----------|-----------|------------|------------|")?;
        Ok(manifest)
    }

    pub(crate) fn append(&mut self, pair: &LabeledPair) -> Result<()> {
        let row = format!(
            "| {} | {} | {} | {} |",
            file_name_lossy(&pair.path_a),
            file_name_lossy(&pair.path_b),
            file_name_lossy(&pair.source_a),
            file_name_lossy(&pair.source_b),
        );
        self.write_line(&row)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| PrepError::FileWriteFailure {
                path: self.path.clone(),
                source,
            })
    }
}
