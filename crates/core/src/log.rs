use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::PrepError;

enum Sink {
    File {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Memory(Vec<String>),
}

/// Plain-text progress/error log for one run.
///
/// The file is truncated when the log is created and every line is flushed
/// as soon as it is written, so the log stays readable if the run aborts.
/// Each line is mirrored to `tracing` as well.
pub struct RunLog {
    sink: Sink,
    errors: u64,
}

impl RunLog {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)
            .map_err(|err| io::Error::new(err.kind(), format!("log {}: {err}", path.display())))?;
        Ok(Self {
            sink: Sink::File {
                path: path.to_path_buf(),
                writer: BufWriter::new(file),
            },
            errors: 0,
        })
    }

    /// Keeps lines in memory instead of writing a file.
    pub fn in_memory() -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
            errors: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File { path, .. } => Some(path),
            Sink::Memory(_) => None,
        }
    }

    /// Lines captured by an in-memory log; always empty for file logs.
    pub fn lines(&self) -> &[String] {
        match &self.sink {
            Sink::File { .. } => &[],
            Sink::Memory(lines) => lines,
        }
    }

    pub fn error_count(&self) -> u64 {
        self.errors
    }

    pub fn progress(&mut self, message: &str) {
        info!("{message}");
        self.append(message);
    }

    pub fn error(&mut self, err: &PrepError) {
        self.errors = self.errors.saturating_add(1);
        let line = format!("[ERROR] {err}");
        warn!("{line}");
        self.append(&line);
    }

    fn append(&mut self, line: &str) {
        match &mut self.sink {
            Sink::File { path, writer } => {
                let written = writeln!(writer, "{line}").and_then(|()| writer.flush());
                if let Err(err) = written {
                    error!("failed to append to log {}: {err}", path.display());
                }
            }
            Sink::Memory(lines) => lines.push(line.to_string()),
        }
    }
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog")
            .field("path", &self.path())
            .field("errors", &self.errors)
            .finish()
    }
}
