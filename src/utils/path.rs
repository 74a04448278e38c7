//! Path normalization utilities.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components lexically.
///
/// Works for paths that do not exist yet. Callers pass absolute paths.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexical() {
        assert_eq!(
            normalize_lexical(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            normalize_lexical(Path::new("other/../assets/x.mjs")),
            PathBuf::from("assets/x.mjs")
        );
        assert_eq!(normalize_lexical(Path::new("../x")), PathBuf::from("../x"));
    }
}
