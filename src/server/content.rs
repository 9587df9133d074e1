// src/server/content.rs
// Resolves request paths against the bundled web front-end. The surface
// loads everything it renders from here, so resolution must never step
// outside the web root.
use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("path escapes the web root: {0}")]
    Forbidden(String),

    #[error("io failure reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

pub struct ContentResolver {
    web_root: PathBuf,
}

impl ContentResolver {
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            web_root: web_root.into(),
        }
    }

    /// Resolve a request path to a bundled asset. Extensionless paths are
    /// client-side routes of the hosted app and fall back to index.html.
    pub async fn resolve(&self, request_path: &str) -> Result<Asset, ContentError> {
        let trimmed = request_path.trim_start_matches('/');

        let candidate = if trimmed.is_empty() {
            PathBuf::from(INDEX_FILE)
        } else {
            let sanitized = sanitize(trimmed)
                .ok_or_else(|| ContentError::Forbidden(request_path.to_string()))?;
            if sanitized.extension().is_some() {
                sanitized
            } else {
                PathBuf::from(INDEX_FILE)
            }
        };

        let full = self.web_root.join(&candidate);
        let bytes = tokio::fs::read(&full).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ContentError::NotFound(request_path.to_string()),
            _ => ContentError::Io {
                path: full.display().to_string(),
                source: e,
            },
        })?;

        Ok(Asset {
            bytes,
            content_type: content_type_for(&candidate),
        })
    }
}

/// Keep only plain path segments; any parent/root/prefix component is a
/// traversal attempt.
fn sanitize(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(segment) => clean.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(clean)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") | Some("map") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("webview-shell-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(root.join("assets")).unwrap();
            fs::write(root.join("index.html"), "<html>app</html>").unwrap();
            fs::write(root.join("assets/app.js"), "console.log('hi')").unwrap();
            Self(root)
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn root_serves_the_index() {
        let root = TempRoot::new();
        let resolver = ContentResolver::new(&root.0);

        let asset = resolver.resolve("/").await.unwrap();
        assert_eq!(asset.bytes, b"<html>app</html>");
        assert_eq!(asset.content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn nested_assets_resolve_with_their_type() {
        let root = TempRoot::new();
        let resolver = ContentResolver::new(&root.0);

        let asset = resolver.resolve("/assets/app.js").await.unwrap();
        assert_eq!(asset.content_type, "application/javascript");
    }

    #[tokio::test]
    async fn client_side_routes_fall_back_to_the_index() {
        let root = TempRoot::new();
        let resolver = ContentResolver::new(&root.0);

        let asset = resolver.resolve("/profile/settings").await.unwrap();
        assert_eq!(asset.content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let root = TempRoot::new();
        let resolver = ContentResolver::new(&root.0);

        let err = resolver.resolve("/../secret.txt").await.unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let root = TempRoot::new();
        let resolver = ContentResolver::new(&root.0);

        let err = resolver.resolve("/missing.png").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}
