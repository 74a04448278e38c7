//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// A request target found under the serve root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Regular file.
    File(PathBuf),
    /// A directory's `index.html`.
    Index(PathBuf),
    /// Directory without an index page.
    Directory(PathBuf),
}

/// Resolve URL to filesystem path, handling index.html for directories
///
/// `serve_root` must already be canonical.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<Resolved> {
    // Undecodable paths name nothing on disk
    let clean = normalize_url(url)?;

    // Reject paths with suspicious patterns early
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    // This prevents traversal via symlinks or encoded sequences
    let canonical = local.canonicalize().ok()?;
    if !canonical.starts_with(serve_root) {
        return None;
    }

    if canonical.is_file() {
        return Some(Resolved::File(canonical));
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(Resolved::Index(index));
        }
        return Some(Resolved::Directory(canonical));
    }

    None
}

/// Path part of a request URL: query and fragment stripped, still encoded.
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Normalize URL: strip query string, decode, trim slashes
///
/// Returns `None` when the decoded bytes are not valid UTF-8.
fn normalize_url(url: &str) -> Option<String> {
    use percent_encoding::percent_decode_str;

    let decoded = percent_decode_str(url_path(url)).decode_utf8().ok()?;
    Some(decoded.trim_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("assets/hero.png"), b"png").unwrap();
        fs::write(root.join("assets/my sprite.png"), b"png").unwrap();
        fs::write(root.join("docs/index.html"), b"<html>").unwrap();
        (temp, root)
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("/a/b.png?v=1"), "/a/b.png");
        assert_eq!(url_path("/a#top"), "/a");
        assert_eq!(url_path("/"), "/");
    }

    #[test]
    fn test_resolve_file() {
        let (_temp, root) = site();
        assert_eq!(
            resolve_path("/assets/hero.png?cache=1", &root),
            Some(Resolved::File(root.join("assets/hero.png")))
        );
    }

    #[test]
    fn test_resolve_percent_encoded() {
        let (_temp, root) = site();
        assert_eq!(
            resolve_path("/assets/my%20sprite.png", &root),
            Some(Resolved::File(root.join("assets/my sprite.png")))
        );
    }

    #[test]
    fn test_resolve_directory_index() {
        let (_temp, root) = site();
        assert_eq!(
            resolve_path("/docs/", &root),
            Some(Resolved::Index(root.join("docs/index.html")))
        );
    }

    #[test]
    fn test_resolve_directory_listing() {
        let (_temp, root) = site();
        assert_eq!(
            resolve_path("/assets/", &root),
            Some(Resolved::Directory(root.join("assets")))
        );
        assert_eq!(resolve_path("/", &root), Some(Resolved::Directory(root.clone())));
    }

    #[test]
    fn test_resolve_missing() {
        let (_temp, root) = site();
        assert_eq!(resolve_path("/assets/nope.png", &root), None);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (_temp, root) = site();
        assert_eq!(resolve_path("/../etc/passwd", &root), None);
        assert_eq!(resolve_path("/assets/%2e%2e/%2e%2e/x", &root), None);
        assert_eq!(resolve_path("/%FF", &root), None);
        assert_eq!(resolve_path("/assets/%C3", &root), None);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/assets/a%20b.png?x=1"), Some("assets/a b.png".into()));
        assert_eq!(normalize_url("/"), Some(String::new()));
        assert_eq!(normalize_url("/%FF"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escape() {
        let (_temp, root) = site();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("link")).unwrap();

        assert_eq!(resolve_path("/link/secret.txt", &root), None);
    }
}
