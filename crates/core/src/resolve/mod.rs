//! Locating Java source files for classes flagged in the smell sheets.
//!
//! Projects live under `<base>/<name prefix>/<project>/`, where the prefix is
//! the project name up to its first `-` (`antlr-2.7.2` lives in
//! `<base>/antlr/antlr-2.7.2`). Inside a project the file is looked up in two
//! phases: first in directories matching the package path, then anywhere.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PrepError;
use crate::log::RunLog;
use crate::types::{JAVA_EXTENSION, LocatedFile, ManualOverrides, ResolveOptions};

mod walker;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Found in a directory whose path ends with the package path.
    Package,
    /// Found by the project-wide fallback search.
    Project,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSearch {
    Found(PathBuf),
    NotFoundInPackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { path: PathBuf, phase: SearchPhase },
    MissingProject { root: PathBuf },
    NotFoundAnywhere { filename: String },
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::MissingProject { .. } | Self::NotFoundAnywhere { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::MissingProject { .. } | Self::NotFoundAnywhere { .. } => None,
        }
    }
}

pub fn project_root(base_dir: &Path, project: &str) -> PathBuf {
    let prefix = project.split('-').next().unwrap_or(project);
    base_dir.join(prefix).join(project)
}

pub fn package_rel_path(package: &str) -> PathBuf {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// File name holding `qualified_name`: the override if one exists, otherwise
/// the outermost class name plus `.java`.
pub fn class_file_name(qualified_name: &str, package: &str, overrides: &ManualOverrides) -> String {
    if let Some(name) = overrides.get(qualified_name) {
        return name.to_string();
    }
    format!("{}{JAVA_EXTENSION}", outer_class_name(qualified_name, package))
}

fn outer_class_name<'a>(qualified_name: &'a str, package: &str) -> &'a str {
    let class_part = if !package.is_empty()
        && let Some(rest) = qualified_name
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
    {
        rest
    } else {
        strip_package_segments(qualified_name)
    };
    class_part.split(['.', '$']).next().unwrap_or(class_part)
}

/// Drops leading lower-case segments (`org.antlr.Tool$Sub` -> `Tool$Sub`).
fn strip_package_segments(qualified_name: &str) -> &str {
    let mut offset = 0usize;
    for segment in qualified_name.split('.') {
        if segment.chars().next().is_some_and(char::is_uppercase) {
            return &qualified_name[offset..];
        }
        offset += segment.len() + 1;
    }
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}

/// Phase one: the first candidate directory whose path below `project_root`
/// ends with `package_path`. An empty package matches every directory.
pub fn search_package(
    project_root: &Path,
    candidates: &[PathBuf],
    package_path: &Path,
    filename: &str,
) -> PackageSearch {
    let hit = candidates.iter().find(|dir| {
        let rel = dir.strip_prefix(project_root).unwrap_or(dir);
        package_path.as_os_str().is_empty() || rel.ends_with(package_path)
    });
    match hit {
        Some(dir) => PackageSearch::Found(dir.join(filename)),
        None => PackageSearch::NotFoundInPackage,
    }
}

/// Phase two: the first candidate anywhere in the project.
pub fn search_project(candidates: &[PathBuf], filename: &str) -> Option<PathBuf> {
    candidates.first().map(|dir| dir.join(filename))
}

pub fn resolve_class(
    base_dir: &Path,
    project: &str,
    package: &str,
    qualified_name: &str,
    options: &ResolveOptions,
    log: &mut RunLog,
) -> Resolution {
    let root = project_root(base_dir, project);
    if !root.is_dir() {
        log.error(&PrepError::MissingProjectDirectory {
            project: project.to_string(),
            root: root.clone(),
        });
        return Resolution::MissingProject { root };
    }

    let filename = class_file_name(qualified_name, package, &options.overrides);
    let candidates = walker::directories_containing(&root, &filename);

    let package_path = package_rel_path(package);
    if let PackageSearch::Found(path) = search_package(&root, &candidates, &package_path, &filename)
    {
        return Resolution::Found {
            path,
            phase: SearchPhase::Package,
        };
    }

    if let Some(path) = search_project(&candidates, &filename) {
        debug!(
            "{filename} for {qualified_name} found outside package {package}: {}",
            path.display()
        );
        return Resolution::Found {
            path,
            phase: SearchPhase::Project,
        };
    }

    log.error(&PrepError::ClassFileNotFound {
        project: project.to_string(),
        package: package.to_string(),
        filename: filename.clone(),
    });
    Resolution::NotFoundAnywhere { filename }
}

pub fn locate_class(
    base_dir: &Path,
    project: &str,
    package: &str,
    qualified_name: &str,
    options: &ResolveOptions,
    log: &mut RunLog,
) -> LocatedFile {
    let resolution = resolve_class(base_dir, project, package, qualified_name, options, log);
    LocatedFile {
        project: project.to_string(),
        package: package.to_string(),
        qualified_name: qualified_name.to_string(),
        path: resolution.into_path(),
    }
}
