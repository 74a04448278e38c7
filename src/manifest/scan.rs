//! Asset root scanning (read-only, no writes).

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use super::{AssetCategory, ManifestError};
use crate::log;

/// A single manifest entry: logical name and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    /// File name without directory or extension.
    pub name: String,
    /// Asset root joined with the file name, `/`-separated.
    pub path: String,
}

/// Result of one scan of the asset root.
///
/// Entries keep directory enumeration order. Duplicate names are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssetScan {
    pub images: Vec<AssetEntry>,
    pub sounds: Vec<AssetEntry>,
    /// Files that could not be classified.
    pub skipped: Vec<PathBuf>,
    /// Subdirectories found at the top level. Never listed in the manifest.
    pub directories: Vec<PathBuf>,
}

impl AssetScan {
    /// Entries of one category.
    pub fn entries(&self, category: AssetCategory) -> &[AssetEntry] {
        match category {
            AssetCategory::Images => &self.images,
            AssetCategory::Sounds => &self.sounds,
        }
    }

    fn push(&mut self, category: AssetCategory, entry: AssetEntry) {
        match category {
            AssetCategory::Images => self.images.push(entry),
            AssetCategory::Sounds => self.sounds.push(entry),
        }
    }
}

/// Scan the top level of `root` and classify every file.
///
/// Unclassifiable files are logged and recorded in [`AssetScan::skipped`].
/// Subdirectories are never listed, whatever their name (a directory called
/// `tiles.png` is not an image); each one gets a warning and is recorded in
/// [`AssetScan::directories`].
pub fn scan_assets(root: &Path) -> Result<AssetScan, ManifestError> {
    let read_err = |err| ManifestError::ReadRoot(root.to_path_buf(), err);

    let mut scan = AssetScan::default();
    for entry in fs::read_dir(root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = root.join(entry.file_name());

        if path.is_dir() {
            log!("warning"; "skipping subdirectory {}", path.display());
            scan.directories.push(path);
            continue;
        }

        match classify_entry(&path) {
            Some((category, entry)) => scan.push(category, entry),
            None => {
                log!("warning"; "could not determine the file type for {}", path.display());
                scan.skipped.push(path);
            }
        }
    }

    Ok(scan)
}

fn classify_entry(path: &Path) -> Option<(AssetCategory, AssetEntry)> {
    let category = AssetCategory::from_path(path)?;
    let name = path.file_stem()?.to_str()?.to_string();
    let path = path.to_str()?;

    let path = if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    };

    Some((category, AssetEntry { name, path }))
}
