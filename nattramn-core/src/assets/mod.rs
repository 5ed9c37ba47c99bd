//! Static asset resolution and serving
//!
//! The resolver is a pure path decision: given a URL path with an extension
//! and the configured static prefix, it yields the path to read from below
//! the working directory, or `None` when no static resolution applies. The
//! read itself is a whole-file `tokio::fs::read` with the handle released
//! unconditionally.

use crate::config::ServerConfig;
use crate::http::error::PageError;
use crate::http::response::PageResponse;

/// Extension of the final path component, if non-empty
///
/// The extension is the last `.`-delimited piece of the final segment:
/// `/app.js` yields `js`, `/docs/readme` yields nothing.
pub fn extension(path: &str) -> Option<&str> {
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Decide the filesystem-facing path for an extensioned request
///
/// A path already inside the configured prefix is served at that path
/// directly; any other extensioned path is rewritten to `/<prefix><path>`.
/// Without a configured prefix there is no static resolution.
pub fn resolve(path: &str, server: &ServerConfig) -> Option<String> {
    let prefix = server.serve_static.as_deref()?;

    if extension(path).is_some() && matches_prefix(path, prefix) {
        return Some(path.to_string());
    }

    Some(format!("/{}{}", prefix, path))
}

/// Whether the path's first segment equals the static prefix
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let rel = path.strip_prefix('/').unwrap_or(path);
    rel == prefix || rel.starts_with(prefix) && rel[prefix.len()..].starts_with('/')
}

/// Read the resolved file below `base` and build a 200 response for it
///
/// Rejects `..` traversal. Content type comes from the fixed extension
/// table; cache headers are left to the finalizer.
pub async fn serve_file(base: &str, path: &str) -> Result<PageResponse, PageError> {
    if path.contains("..") {
        return Err(PageError::AssetNotFound {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "path traversal"),
        });
    }

    let file_path = format!("{}{}", base, path);
    let content = tokio::fs::read(&file_path)
        .await
        .map_err(|source| PageError::AssetNotFound { path: path.to_string(), source })?;

    log::debug!("serving {} from disk ({} bytes)", path, content.len());

    let mime = media_type(extension(path).unwrap_or(""));
    Ok(PageResponse::ok(mime, content))
}

/// Fixed extension-to-MIME table for static responses
pub fn media_type(extension: &str) -> &'static str {
    match extension {
        "css" => "text/css",
        "html" | "htm" => "text/html",
        "json" | "map" => "application/json",
        "js" | "mjs" => "application/javascript",
        "md" | "txt" => "text/plain",
        "rs" | "c" | "h" | "py" | "ts" | "sh" => "text/plain",
        "gz" => "application/gzip",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        _ => "text/plain",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::CONTENT_TYPE;

    fn config_with_prefix(prefix: &str) -> ServerConfig {
        ServerConfig { serve_static: Some(prefix.to_string()), ..Default::default() }
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("/app.js"), Some("js"));
        assert_eq!(extension("/assets/site.min.css"), Some("css"));
        assert_eq!(extension("/docs/readme"), None);
        assert_eq!(extension("/trailing."), None);
        assert_eq!(extension("/v1.2/readme"), None);
    }

    #[test]
    fn test_resolve_rewrites_outside_prefix() {
        let config = config_with_prefix("public");
        assert_eq!(resolve("/app.js", &config).as_deref(), Some("/public/app.js"));
    }

    #[test]
    fn test_resolve_serves_prefixed_path_directly() {
        let config = config_with_prefix("public");
        assert_eq!(resolve("/public/style.css", &config).as_deref(), Some("/public/style.css"));
    }

    #[test]
    fn test_resolve_without_prefix() {
        assert_eq!(resolve("/app.js", &ServerConfig::default()), None);
    }

    #[test]
    fn test_prefix_segment_must_be_exact() {
        let config = config_with_prefix("public");
        // "publicity" is not inside the "public" prefix
        assert_eq!(
            resolve("/publicity/a.js", &config).as_deref(),
            Some("/public/publicity/a.js")
        );
    }

    #[tokio::test]
    async fn test_serve_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("public")).unwrap();
        std::fs::write(dir.path().join("public/app.js"), "console.log(1)").unwrap();

        let base = dir.path().to_str().unwrap();
        let resp = serve_file(base, "/public/app.js").await.unwrap();
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "application/javascript");
        assert_eq!(resp.body.as_ref(), b"console.log(1)");
    }

    #[tokio::test]
    async fn test_serve_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        let err = serve_file(base, "/public/missing.css").await.unwrap_err();
        assert!(matches!(err, PageError::AssetNotFound { .. }));
    }

    #[tokio::test]
    async fn test_serve_file_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        let err = serve_file(base, "/public/../etc/passwd").await.unwrap_err();
        assert!(matches!(err, PageError::AssetNotFound { .. }));
    }

    #[test]
    fn test_media_type_table() {
        assert_eq!(media_type("md"), "text/plain");
        assert_eq!(media_type("svg"), "image/svg+xml");
        assert_eq!(media_type("map"), "application/json");
        assert_eq!(media_type("webp"), "image/webp");
        // Unknown extensions fall back to text/plain
        assert_eq!(media_type("wasm"), "text/plain");
    }
}
