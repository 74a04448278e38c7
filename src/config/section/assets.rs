//! `[assets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! root = "assets"             # Flat directory scanned for images and sounds
//! manifest = "Assets.mjs"     # Generated module
//! ```
//!
//! Both paths are relative to the working directory. The asset root is
//! written into the manifest exactly as given here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Asset root and manifest location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory scanned (top level only) for assets.
    pub root: PathBuf,

    /// Manifest module written on every change.
    pub manifest: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            manifest: PathBuf::from("Assets.mjs"),
        }
    }
}

impl AssetsConfig {
    /// Whether the manifest would be written inside the watched tree.
    ///
    /// Writing there would make every regeneration trigger another one.
    pub fn manifest_inside_root(&self) -> bool {
        let (Ok(root), Ok(manifest)) = (
            std::path::absolute(&self.root),
            std::path::absolute(&self.manifest),
        ) else {
            return false;
        };
        let root = crate::utils::path::normalize_lexical(&root);
        let manifest = crate::utils::path::normalize_lexical(&manifest);
        manifest.starts_with(root)
    }
}
