//! Content types inferred from file extensions.

use std::borrow::Cow;
use std::fmt;

use swaggerui_vfs::Path;

/// A MIME type for the `Content-Type` response header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentType(pub Cow<'static, str>);

impl ContentType {
    pub const HTML: ContentType = ContentType::from_static("text/html; charset=utf-8");
    pub const CSS: ContentType = ContentType::from_static("text/css; charset=utf-8");
    pub const JAVASCRIPT: ContentType =
        ContentType::from_static("text/javascript; charset=utf-8");
    pub const JSON: ContentType = ContentType::from_static("application/json");
    pub const YAML: ContentType = ContentType::from_static("application/yaml");
    pub const TEXT: ContentType = ContentType::from_static("text/plain; charset=utf-8");
    pub const PNG: ContentType = ContentType::from_static("image/png");
    pub const SVG: ContentType = ContentType::from_static("image/svg+xml");
    pub const ICO: ContentType = ContentType::from_static("image/x-icon");
    pub const WOFF2: ContentType = ContentType::from_static("font/woff2");

    /// Opaque binary data, used when the extension is unknown.
    pub const OCTET_STREAM: ContentType = ContentType::from_static("application/octet-stream");

    pub const fn from_static(s: &'static str) -> Self {
        ContentType(Cow::Borrowed(s))
    }

    pub fn new(s: impl Into<String>) -> Self {
        ContentType(Cow::Owned(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look up an extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let content_type = match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Self::HTML,
            "css" => Self::CSS,
            "js" | "mjs" => Self::JAVASCRIPT,
            "json" | "map" => Self::JSON,
            "yaml" | "yml" => Self::YAML,
            "txt" | "md" => Self::TEXT,
            "png" => Self::PNG,
            "svg" => Self::SVG,
            "ico" => Self::ICO,
            "woff2" => Self::WOFF2,
            _ => return None,
        };
        Some(content_type)
    }

    /// Content type for a file path, falling back to `application/octet-stream`.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(Self::from_extension)
            .unwrap_or(Self::OCTET_STREAM)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
