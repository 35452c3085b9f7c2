//! Responses for static resources and the two error outcomes.
//!
//! Bodies are deliberately uninformative: the cause of a 404 or 500 is only
//! ever logged.

use crate::serve::{mime, LiveEndpoints, ResolvedFile};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::Path;

/// `Cache-Control` value sent with everything this server produces.
pub const NO_STORE: &str = "no-store";

const BODY_CLOSE: &[u8] = b"</body>";

/// Serve a resolved file, injecting the reload script into HTML.
pub async fn resource_response(file: &ResolvedFile, endpoints: &LiveEndpoints) -> Response {
    let mime = mime::mime_for_path(file.path());

    let content = match tokio::fs::read(file.path()).await {
        Ok(content) => content,
        Err(e) => return server_fault(file.path(), &e),
    };

    let body = if mime::is_html(mime) {
        inject_reload_script(content, &endpoints.script_tag())
    } else {
        content
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime), (header::CACHE_CONTROL, NO_STORE)],
        body,
    )
        .into_response()
}

/// Insert `script_tag` and a newline right before the first `</body>`.
///
/// Without a `</body>` the content comes back untouched, byte for byte.
pub fn inject_reload_script(html: Vec<u8>, script_tag: &str) -> Vec<u8> {
    let Some(pos) = memchr::memmem::find(&html, BODY_CLOSE) else {
        return html;
    };

    let mut result = Vec::with_capacity(html.len() + script_tag.len() + 1);
    result.extend_from_slice(&html[..pos]);
    result.extend_from_slice(script_tag.as_bytes());
    result.push(b'\n');
    result.extend_from_slice(&html[pos..]);
    result
}

/// Uniform 404.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "Not found",
    )
        .into_response()
}

/// 500 for a file that resolved but could not be read.
pub fn server_fault(path: &Path, err: &std::io::Error) -> Response {
    tracing::error!(path = %path.display(), error = %err, "Error while serving file");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        "Internal server error",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serve::PathResolver;
    use axum::body::to_bytes;
    use tempfile::TempDir;

    const TAG: &str = r#"<script src="/abc.js"></script>"#;

    #[test]
    fn test_inject_before_body_close() {
        let html = b"<html><body><h1>Test</h1></body></html>".to_vec();
        let result = String::from_utf8(inject_reload_script(html, TAG)).unwrap();

        assert_eq!(
            result,
            "<html><body><h1>Test</h1><script src=\"/abc.js\"></script>\n</body></html>"
        );
        assert_eq!(result.matches(TAG).count(), 1);
    }

    #[test]
    fn test_inject_only_first_body_close() {
        let html = b"<body>a</body><template></body></template>".to_vec();
        let result = String::from_utf8(inject_reload_script(html, TAG)).unwrap();

        assert_eq!(result.matches(TAG).count(), 1);
        assert!(result.starts_with("<body>a<script"));
    }

    #[test]
    fn test_without_body_close_is_byte_identical() {
        let html = b"<html><h1>Test</h1></html>".to_vec();
        assert_eq!(inject_reload_script(html.clone(), TAG), html);

        // Not valid UTF-8, still untouched
        let latin1 = vec![b'<', b'p', b'>', 0xE9, b'<', b'/', b'p', b'>'];
        assert_eq!(inject_reload_script(latin1.clone(), TAG), latin1);
    }

    #[test]
    fn test_uppercase_body_close_is_not_matched() {
        let html = b"<HTML><BODY>x</BODY></HTML>".to_vec();
        assert_eq!(inject_reload_script(html.clone(), TAG), html);
    }

    async fn resolve(temp: &TempDir, name: &str) -> ResolvedFile {
        let root = std::fs::canonicalize(temp.path()).unwrap();
        PathResolver::new(root, "index.html")
            .resolve(name)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_html_response_is_patched() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<html><body>hi</body></html>").unwrap();
        let endpoints = LiveEndpoints::generate();

        let file = resolve(&temp, "/").await;
        let response = resource_response(&file, &endpoints).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_STORE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("hi"));
        assert!(body.contains(&endpoints.script_tag()));
    }

    #[tokio::test]
    async fn test_binary_response_is_raw() {
        let temp = TempDir::new().unwrap();
        let bytes = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        std::fs::write(temp.path().join("logo.png"), &bytes).unwrap();

        let file = resolve(&temp, "/logo.png").await;
        let response = resource_response(&file, &LiveEndpoints::generate()).await;

        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), bytes.as_slice());
    }

    #[tokio::test]
    async fn test_unknown_extension_is_octet_stream() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("blob.weird"), "x").unwrap();

        let file = resolve(&temp, "/blob.weird").await;
        let response = resource_response(&file, &LiveEndpoints::generate()).await;

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            mime::DEFAULT_MIME_TYPE
        );
    }

    #[tokio::test]
    async fn test_file_vanished_after_resolution_is_server_fault() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("gone.txt"), "soon gone").unwrap();

        let file = resolve(&temp, "/gone.txt").await;
        std::fs::remove_file(file.path()).unwrap();

        let response = resource_response(&file, &LiveEndpoints::generate()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), b"Internal server error");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), b"Not found");
    }
}
