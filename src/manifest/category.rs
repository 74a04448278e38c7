//! Asset category lookup.

use std::path::Path;

/// Kind of asset listed in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Images,
    Sounds,
}

impl AssetCategory {
    /// All categories, in manifest order.
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Images, AssetCategory::Sounds];

    /// Exported binding name in the manifest module.
    pub const fn export_name(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Sounds => "sounds",
        }
    }

    /// Classify by extension (without the leading dot).
    ///
    /// Matching is case-sensitive: `HERO.PNG` is not an image.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" | "jpg" | "jpeg" | "bmp" => Some(Self::Images),
            "wav" | "ogg" | "mp3" => Some(Self::Sounds),
            _ => None,
        }
    }

    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_image_extensions() {
        for ext in ["png", "jpg", "jpeg", "bmp"] {
            assert_eq!(AssetCategory::from_extension(ext), Some(AssetCategory::Images));
        }
    }

    #[test]
    fn test_sound_extensions() {
        for ext in ["wav", "ogg", "mp3"] {
            assert_eq!(AssetCategory::from_extension(ext), Some(AssetCategory::Sounds));
        }
    }

    #[test]
    fn test_unknown_extensions() {
        assert_eq!(AssetCategory::from_extension("txt"), None);
        assert_eq!(AssetCategory::from_extension("gif"), None);
        assert_eq!(AssetCategory::from_extension(""), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(AssetCategory::from_extension("PNG"), None);
        assert_eq!(AssetCategory::from_path(&PathBuf::from("hero.Wav")), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            AssetCategory::from_path(&PathBuf::from("assets/hero.png")),
            Some(AssetCategory::Images)
        );
        assert_eq!(
            AssetCategory::from_path(&PathBuf::from("assets/archive.tar.mp3")),
            Some(AssetCategory::Sounds)
        );
        // Dotfiles have no extension
        assert_eq!(AssetCategory::from_path(&PathBuf::from("assets/.png")), None);
        assert_eq!(AssetCategory::from_path(&PathBuf::from("assets/README")), None);
    }
}
