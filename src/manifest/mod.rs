//! Asset manifest generation.
//!
//! ```text
//! asset root ──scan──▶ AssetScan ──render──▶ module source ──write──▶ Assets.mjs
//! ```
//!
//! Every generation is a full rescan and a full rewrite. The manifest holds
//! no state between runs.

mod category;
mod render;
mod report;
mod scan;
mod write;

pub use category::AssetCategory;
pub use render::render_manifest;
pub use report::{regenerate, report_failure};
pub use scan::{AssetEntry, AssetScan, scan_assets};
pub use write::write_atomic;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::AppConfig;

/// Manifest generation errors. Both abort the current generation.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read asset root `{}`", .0.display())]
    ReadRoot(PathBuf, #[source] std::io::Error),

    #[error("failed to write manifest `{}`", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// Summary of one successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestReport {
    pub images: usize,
    pub sounds: usize,
    pub skipped: usize,
}

impl ManifestReport {
    fn from_scan(scan: &AssetScan) -> Self {
        Self {
            images: scan.images.len(),
            sounds: scan.sounds.len(),
            skipped: scan.skipped.len(),
        }
    }
}

/// Regenerate the manifest described by `config`.
pub fn generate(config: &AppConfig) -> Result<ManifestReport, ManifestError> {
    generate_at(&config.assets.root, &config.assets.manifest)
}

/// Scan `root` and replace `manifest` with the rendered module.
pub fn generate_at(root: &Path, manifest: &Path) -> Result<ManifestReport, ManifestError> {
    let scan = scan_assets(root)?;
    let source = render_manifest(&scan);
    write_atomic(manifest, source.as_bytes())?;

    crate::debug!("manifest"; "wrote {}", manifest.display());
    Ok(ManifestReport::from_scan(&scan))
}
