//! Static file serving module
//!
//! File loading shared by the `/static/`, browser and `/cors` routes.
//! Paths are built by plain concatenation of a root and the request path.

use crate::config::FilesConfig;
use crate::http::{self, mime, ResponseBody, ALLOW_ANY_ORIGIN};
use crate::logger;
use hyper::http::request::Parts;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// A file read fully into memory
#[derive(Debug)]
pub struct LoadedFile {
    pub data: Vec<u8>,
    /// Size reported by the filesystem, sent as `Content-Length`
    pub size: u64,
    pub content_type: &'static str,
}

impl LoadedFile {
    pub fn into_response(self) -> Response<ResponseBody> {
        http::build_file_response(self.data, self.size, self.content_type)
    }
}

/// Root and request path joined as strings, no sanitizing
pub fn resolve(root: &str, request_path: &str) -> PathBuf {
    PathBuf::from(format!("{root}{request_path}"))
}

/// Serve `/static/...` from the static root
pub async fn serve_static(parts: &Parts, files: &FilesConfig) -> Response<ResponseBody> {
    let path = parts.uri.path();
    logger::log_handler("Static", path);

    match load_file(&resolve(&files.static_root, path)).await {
        Some(file) => {
            let mut response = file.into_response();
            http::apply_headers(&mut response, &[ALLOW_ANY_ORIGIN]);
            response
        }
        None => http::build_404_response(),
    }
}

/// Serve browser assets, `/` being the index file
pub async fn serve_browser(parts: &Parts, files: &FilesConfig) -> Response<ResponseBody> {
    let path = parts.uri.path();
    logger::log_handler("Browser", path);

    let index;
    let path = if path == "/" {
        index = format!("/{}", files.browser_index);
        index.as_str()
    } else {
        path
    };

    // No CORS header on this route, found or not
    match load_file(&resolve(&files.browser_root, path)).await {
        Some(file) => file.into_response(),
        None => http::build_404_response(),
    }
}

/// Open, stat and read a file; `None` (logged) when any step fails
pub async fn load_file(path: &Path) -> Option<LoadedFile> {
    let mut file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            logger::log_warning(&format!("Failed to open '{}': {e}", path.display()));
            return None;
        }
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {e}", path.display()));
            return None;
        }
    };
    if metadata.is_dir() {
        logger::log_warning(&format!("'{}' is a directory", path.display()));
        return None;
    }

    let mut data = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    if let Err(e) = file.read_to_end(&mut data).await {
        logger::log_error(&format!("Failed to read '{}': {e}", path.display()));
        return None;
    }

    // File changed between stat and read: trust what was read
    let mut size = metadata.len();
    if data.len() as u64 != size {
        logger::log_warning(&format!(
            "'{}' changed while reading ({size} -> {} bytes)",
            path.display(),
            data.len()
        ));
        size = data.len() as u64;
    }

    Some(LoadedFile {
        data,
        size,
        content_type: mime::content_type_for(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::body::Bytes;
    use hyper::{Request, StatusCode};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FilesConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::create_dir_all(dir.path().join("browser/js")).unwrap();
        std::fs::write(dir.path().join("static/banksy.jpg"), [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
        std::fs::write(dir.path().join("browser/index.html"), "<html>tests</html>").unwrap();
        std::fs::write(dir.path().join("browser/js/test.js"), "run();").unwrap();

        let root = dir.path().to_str().unwrap().to_string();
        let files = FilesConfig {
            static_root: root.clone(),
            browser_root: format!("{root}/browser"),
            browser_index: "index.html".to_string(),
            cors_file: format!("{root}/static/banksy.jpg"),
        };
        (dir, files)
    }

    fn get(path: &str) -> Parts {
        Request::get(path).body(()).unwrap().into_parts().0
    }

    async fn body_bytes(response: Response<ResponseBody>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_resolve_is_plain_concatenation() {
        assert_eq!(resolve(".", "/static/a.txt"), PathBuf::from("./static/a.txt"));
        assert_eq!(resolve("./browser", "/index.html"), PathBuf::from("./browser/index.html"));
    }

    #[tokio::test]
    async fn test_static_found() {
        let (_dir, files) = fixture();
        let resp = serve_static(&get("/static/banksy.jpg"), &files).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "5");
        assert_eq!(resp.headers()["content-type"], "image/jpeg");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]));
    }

    #[tokio::test]
    async fn test_static_missing() {
        let (_dir, files) = fixture();
        let resp = serve_static(&get("/static/nope.jpg"), &files).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_static_directory_is_not_found() {
        let (_dir, files) = fixture();
        let resp = serve_static(&get("/static/"), &files).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_browser_root_serves_index() {
        let (_dir, files) = fixture();
        let resp = serve_browser(&get("/"), &files).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["content-length"], "18");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"<html>tests</html>"));
    }

    #[tokio::test]
    async fn test_browser_nested_asset() {
        let (_dir, files) = fixture();
        let resp = serve_browser(&get("/js/test.js"), &files).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("access-control-allow-origin").is_none());
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"run();"));
    }

    #[tokio::test]
    async fn test_browser_missing_has_no_cors() {
        let (_dir, files) = fixture();
        let resp = serve_browser(&get("/missing.html"), &files).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }
}
