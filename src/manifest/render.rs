//! Manifest module serialization.
//!
//! Output layout (consumed by downstream tooling, keep byte-for-byte):
//!
//! ```text
//! export const images = {
//!     "hero": "assets/hero.png",
//! };
//!
//! export const sounds = {
//!     "explosion": "assets/explosion.wav",
//! };
//!
//! export const assets = { images, sounds };
//!
//! ```

use super::{AssetCategory, AssetEntry, AssetScan};

const INDENT: &str = "    ";

/// Render a scan as the manifest module source.
pub fn render_manifest(scan: &AssetScan) -> String {
    let mut out = String::new();

    for category in AssetCategory::ALL {
        render_mapping(&mut out, category.export_name(), scan.entries(category));
    }

    let names: Vec<_> = AssetCategory::ALL.iter().map(|c| c.export_name()).collect();
    out.push_str(&format!("export const assets = {{ {} }};\n\n", names.join(", ")));
    out
}

fn render_mapping(out: &mut String, export: &str, entries: &[AssetEntry]) {
    out.push_str(&format!("export const {export} = {{\n"));
    for entry in entries {
        out.push_str(&format!(
            "{INDENT}{}: {},\n",
            quote(&entry.name),
            quote(&entry.path)
        ));
    }
    out.push_str("};\n\n");
}

/// Quote as a JSON string literal, which is also a valid JS string literal.
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
