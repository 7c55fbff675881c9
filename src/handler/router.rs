//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, access
//! logging, and a fixed-priority dispatch table. The fixed API endpoints
//! are matched before the catch-all static resolver, and no path ever
//! produces an "unknown route" error.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path.clone());
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header_string(&req, "referer");
    entry.user_agent = header_string(&req, "user-agent");

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let mut response = match check_http_method(&method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => match check_body_size(&req, state.config.http.max_body_size) {
            Some(resp) => resp,
            None => {
                let ctx = RequestContext {
                    path: &path,
                    is_head,
                };
                route_request(&ctx, &state).await
            }
        },
    };

    // Every route permits cross-origin requests from any origin.
    if state.config.http.enable_cors {
        http::apply_cors(&mut response);
    }

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path, fixed endpoints before the catch-all.
pub async fn route_request(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match ctx.path {
        "/api/hello" => api::hello(),
        "/api/hello-image" => api::hello_image(state, ctx.is_head).await,
        _ => static_files::resolve(ctx, state).await,
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// State whose asset root also contains a file shadowing an API path.
    fn spa_state() -> (tempfile::TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist");
        std::fs::create_dir_all(root.join("api")).unwrap();
        std::fs::write(root.join("index.html"), b"<html>index</html>").unwrap();
        std::fs::write(root.join("api").join("hello"), b"shadowed file").unwrap();

        let mut config = test_config();
        config.assets.root = root.to_string_lossy().into_owned();
        (dir, Arc::new(AppState::new(config)))
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
        }
    }

    #[tokio::test]
    async fn hello_endpoint_returns_exact_body() {
        let (_dir, state) = spa_state();
        let resp = route_request(&ctx("/api/hello"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "{\"message\": \"Hello from Flask!\"}");
    }

    #[tokio::test]
    async fn fixed_endpoints_win_over_static_files() {
        // dist/api/hello exists on disk, but the fixed endpoint has priority
        let (_dir, state) = spa_state();
        let resp = route_request(&ctx("/api/hello"), &state).await;
        assert_ne!(body_string(resp).await, "shadowed file");
    }

    #[tokio::test]
    async fn unmatched_path_falls_through_to_resolver() {
        let (_dir, state) = spa_state();
        let resp = route_request(&ctx("/settings/profile"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "<html>index</html>");
    }

    #[tokio::test]
    async fn hello_image_missing_is_404() {
        let (_dir, state) = spa_state();
        let resp = route_request(&ctx("/api/hello-image"), &state).await;
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn post_is_rejected() {
        let resp = check_http_method(&Method::POST, true).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn options_gets_preflight_headers() {
        let resp = check_http_method(&Method::OPTIONS, true).unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(
            resp.headers()["Access-Control-Allow-Methods"],
            "GET, HEAD, OPTIONS"
        );
    }
}
