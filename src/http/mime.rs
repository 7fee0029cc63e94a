//! MIME type detection module
//!
//! Picks the `Content-Type` of a served file from its extension.

use std::path::Path;

/// Content-Type for a file path, `application/octet-stream` when unknown
///
/// # Examples
/// ```
/// use std::path::Path;
/// use testwww::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("static/banksy.jpg")), "image/jpeg");
/// assert_eq!(content_type_for(Path::new("browser/index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "text/xml; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type_for(Path::new("a/b.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type_for(Path::new("bundle.js.map")), "application/json");
        assert_eq!(content_type_for(Path::new("BANKSY.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("data.json")), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for(Path::new("blob.xyz")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("Makefile")), "application/octet-stream");
    }
}
