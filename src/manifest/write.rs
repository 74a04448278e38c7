//! Atomic manifest replacement.
//!
//! The new contents go to a temporary file next to the target, then the
//! temporary file is renamed over it. Readers see either the old manifest
//! or the new one, never a truncated file. If anything fails the temporary
//! file is removed when its guard drops.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::ManifestError;

/// Prefix for in-flight temporary files.
pub const TEMP_PREFIX: &str = ".assetwatch-";

/// Replace `path` with `contents`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ManifestError> {
    let err = |e| ManifestError::Write(path.to_path_buf(), e);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(err)?;

    tmp.write_all(contents).map_err(err)?;
    tmp.flush().map_err(err)?;

    if let Some(perms) = target_permissions(path) {
        tmp.as_file().set_permissions(perms).map_err(err)?;
    }

    tmp.persist(path).map_err(|e| err(e.error))?;
    Ok(())
}

/// Keep the permissions of an existing manifest; new ones are world-readable.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}
