//! Static asset resolution module
//!
//! Resolves request paths against the prebuilt SPA bundle. A path that
//! names a file under the asset root serves that file; anything else
//! serves the fallback document so the client-side router can take over.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Outcome of looking up a request path under the asset root.
enum Lookup {
    /// A regular file matched the path.
    Hit(Vec<u8>, &'static str),
    /// Nothing matched; the fallback document applies.
    Miss,
    /// The path resolved outside the asset root.
    Escape,
}

/// Resolve a request path to a static file or the fallback document.
///
/// The empty path (`/`) serves the fallback directly without a lookup.
/// A missing fallback document is the only case that yields 404.
pub async fn resolve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(root) = state.asset_root.as_deref() else {
        logger::log_warning(&format!(
            "Asset root '{}' not found or inaccessible",
            state.config.assets.root
        ));
        return http::build_404_response();
    };

    let relative = ctx.path.trim_start_matches('/');
    if !relative.is_empty() {
        match lookup_asset(root, relative).await {
            Lookup::Hit(content, content_type) => {
                return http::build_file_response(content, content_type, ctx.is_head);
            }
            Lookup::Escape => {
                logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
                return http::build_404_response();
            }
            Lookup::Miss => {}
        }
    }

    serve_fallback(root, state, ctx.is_head).await
}

/// Look up a non-empty relative path under the canonicalized asset root.
async fn lookup_asset(root: &Path, relative: &str) -> Lookup {
    let candidate = root.join(relative);

    // Canonicalize before reading so symlinks and `..` segments cannot
    // reach outside the root. Nonexistent paths fail canonicalization
    // and count as a miss.
    let Ok(canonical) = candidate.canonicalize() else {
        return Lookup::Miss;
    };
    if !canonical.starts_with(root) {
        return Lookup::Escape;
    }
    if !canonical.is_file() {
        return Lookup::Miss;
    }

    match fs::read(&canonical).await {
        Ok(content) => {
            let content_type =
                mime::content_type_for(canonical.extension().and_then(|e| e.to_str()));
            Lookup::Hit(content, content_type)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                canonical.display()
            ));
            Lookup::Miss
        }
    }
}

/// Serve the fallback document, or 404 if it is missing from the bundle.
async fn serve_fallback(root: &Path, state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let fallback = root.join(&state.config.assets.fallback);
    match fs::read(&fallback).await {
        Ok(content) => {
            let content_type =
                mime::content_type_for(fallback.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type, is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Fallback document missing at '{}': {e}",
                fallback.display()
            ));
            http::build_404_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config, AppState};
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    /// Asset root under a tempdir with an index document and one built file.
    fn spa_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("index.html"), b"<html>index</html>").unwrap();
        std::fs::write(root.join("app.js"), b"console.log('app');").unwrap();

        let mut config = test_config();
        config.assets.root = root.to_string_lossy().into_owned();
        let state = AppState::new(config);
        (dir, state)
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
        }
    }

    #[tokio::test]
    async fn exact_file_is_served_with_its_type() {
        let (_dir, state) = spa_state();
        let resp = resolve(&ctx("/app.js"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
        assert_eq!(body_bytes(resp).await, b"console.log('app');");
    }

    #[tokio::test]
    async fn unknown_path_serves_fallback() {
        let (_dir, state) = spa_state();
        let resp = resolve(&ctx("/dashboard/settings"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_bytes(resp).await, b"<html>index</html>");
    }

    #[tokio::test]
    async fn root_path_serves_fallback_directly() {
        let (_dir, state) = spa_state();
        let resp = resolve(&ctx("/"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_bytes(resp).await, b"<html>index</html>");
    }

    #[tokio::test]
    async fn traversal_never_escapes_asset_root() {
        let (dir, state) = spa_state();
        // A real file one level above the asset root
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();

        let resp = resolve(&ctx("/../secret.txt"), &state).await;
        assert_eq!(resp.status(), 404);

        let resp = resolve(&ctx("/static/../../secret.txt"), &state).await;
        let body = body_bytes(resp).await;
        assert_ne!(body, b"top secret");
    }

    #[tokio::test]
    async fn missing_fallback_is_404() {
        let (_dir, state) = spa_state();
        let root = state.asset_root.clone().unwrap();
        std::fs::remove_file(root.join("index.html")).unwrap();

        let resp = resolve(&ctx("/no/such/page"), &state).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn missing_asset_root_is_404() {
        let mut config = test_config();
        config.assets.root = "/nonexistent/dist".to_string();
        let state = AppState::new(config);

        let resp = resolve(&ctx("/"), &state).await;
        assert_eq!(resp.status(), 404);
    }
}
