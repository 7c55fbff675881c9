//! Fixed API endpoint handlers
//!
//! The two endpoints the frontend calls directly. Both are pure functions
//! of their request; neither keeps cross-request state.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Greeting body served by `GET /api/hello`.
///
/// This exact byte sequence is an external contract with existing clients;
/// it is a literal rather than a serialized struct so the wire format can
/// never drift.
pub const HELLO_BODY: &str = r#"{"message": "Hello from Flask!"}"#;

/// `GET /api/hello`: fixed JSON greeting, query parameters ignored.
pub fn hello() -> Response<Full<Bytes>> {
    http::build_json_response(HELLO_BODY)
}

/// `GET /api/hello-image`: the configured PNG, or 404 if it is absent.
pub async fn hello_image(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(&state.hello_image).await {
        Ok(bytes) => http::build_file_response(bytes, "image/png", is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Hello image missing at '{}': {e}",
                state.hello_image.display()
            ));
            http::build_404_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config, AppState};

    #[test]
    fn hello_body_is_byte_exact() {
        let resp = hello();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(HELLO_BODY, "{\"message\": \"Hello from Flask!\"}");
    }

    #[test]
    fn hello_body_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(HELLO_BODY).unwrap();
        assert_eq!(parsed["message"], "Hello from Flask!");
    }

    #[tokio::test]
    async fn hello_image_present() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("hello_world.png");
        std::fs::write(&image_path, b"\x89PNG\r\n\x1a\n").unwrap();

        let mut config = test_config();
        config.assets.hello_image = image_path.to_string_lossy().into_owned();
        let state = AppState::new(config);

        let resp = hello_image(&state, false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
    }

    #[tokio::test]
    async fn hello_image_absent_is_404() {
        let mut config = test_config();
        config.assets.hello_image = "/nonexistent/hello_world.png".to_string();
        let state = AppState::new(config);

        let resp = hello_image(&state, false).await;
        assert_eq!(resp.status(), 404);
    }
}
