use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of a category directory argument.
///
/// `.` or `foo/..` have no usable file name, so the refactored sibling and
/// the output folder could not be derived from them as typed. Symlinks are
/// left alone; the sibling sits next to the name the user gave.
pub(crate) fn category_dir(p: &Path) -> io::Result<PathBuf> {
    if p.is_absolute() {
        return Ok(lexical_normalize(p));
    }
    Ok(lexical_normalize(&env::current_dir()?.join(p)))
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_dot_and_dot_dot() {
        assert_eq!(
            lexical_normalize(Path::new("/data/./smells/../dataset-god-class/")),
            PathBuf::from("/data/dataset-god-class")
        );
    }

    #[test]
    fn relative_dot_gets_a_file_name() -> io::Result<()> {
        let dir = category_dir(Path::new("."))?;
        assert!(dir.is_absolute());
        assert_eq!(dir, lexical_normalize(&env::current_dir()?));
        Ok(())
    }
}
