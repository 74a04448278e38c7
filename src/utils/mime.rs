//! MIME type detection for the static file server.
//!
//! Generic types come from [`from_extension`]. A [`MimeMap`] layers
//! per-extension overrides on top; the server installs the script overrides
//! before it starts serving.

use std::path::Path;

use rustc_hash::FxHashMap;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const MARKDOWN: &str = "text/markdown; charset=utf-8";

    /// JavaScript, including ES modules.
    pub const JAVASCRIPT: &str = "text/javascript";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const WASM: &str = "application/wasm";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";

    // Audio
    pub const MP3: &str = "audio/mpeg";
    pub const WAV: &str = "audio/wav";
    pub const OGG_AUDIO: &str = "audio/ogg";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
}

/// Script extensions always served as JavaScript modules.
pub const SCRIPT_OVERRIDES: [(&str, &str); 2] =
    [("js", types::JAVASCRIPT), ("mjs", types::JAVASCRIPT)];

/// Guess a generic MIME type from a file extension string.
///
/// Scripts deliberately fall through to `application/octet-stream` here;
/// their type comes from the overrides in [`MimeMap`].
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("html" | "htm") => types::HTML,
        Some("css") => types::CSS,
        Some("json" | "map") => types::JSON,
        Some("xml") => types::XML,
        Some("txt") => types::PLAIN,
        Some("md") => types::MARKDOWN,
        Some("wasm") => types::WASM,

        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("svg") => types::SVG,
        Some("ico") => types::ICO,
        Some("bmp") => types::BMP,

        Some("mp3") => types::MP3,
        Some("wav") => types::WAV,
        Some("ogg" | "oga") => types::OGG_AUDIO,

        Some("woff") => types::WOFF,
        Some("woff2") => types::WOFF2,
        Some("ttf") => types::TTF,

        _ => types::OCTET_STREAM,
    }
}

/// Extension → MIME lookup with overrides.
#[derive(Debug, Default, Clone)]
pub struct MimeMap {
    overrides: FxHashMap<&'static str, &'static str>,
}

impl MimeMap {
    /// Generic lookup only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generic lookup with `.js` / `.mjs` forced to JavaScript.
    pub fn with_script_overrides() -> Self {
        let mut map = Self::new();
        for (ext, mime) in SCRIPT_OVERRIDES {
            map.insert(ext, mime);
        }
        map
    }

    /// Override the type for one extension (without the dot).
    pub fn insert(&mut self, ext: &'static str, mime: &'static str) {
        self.overrides.insert(ext, mime);
    }

    /// MIME type for a path.
    pub fn for_path(&self, path: &Path) -> &'static str {
        let ext = path.extension().and_then(|e| e.to_str());
        ext.and_then(|e| self.overrides.get(e).copied())
            .unwrap_or_else(|| from_extension(ext))
    }
}
