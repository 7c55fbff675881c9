// Application state module
// Immutable per-process state shared across request handlers

use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Built once at startup and shared read-only via `Arc`; request handlers
/// never mutate it, so concurrent access needs no locking.
pub struct AppState {
    pub config: Config,
    /// Canonicalized asset root, resolved once so the per-request traversal
    /// check compares against a stable absolute path.
    pub asset_root: Option<PathBuf>,
    /// Path of the fixed image served by `/api/hello-image`.
    pub hello_image: PathBuf,
}

impl AppState {
    /// Create `AppState` from loaded configuration.
    ///
    /// The asset root is canonicalized here; if the directory does not exist
    /// yet (e.g. the frontend bundle has not been built), the server still
    /// starts and every catch-all request answers 404 until it appears on a
    /// restart.
    pub fn new(config: Config) -> Self {
        let asset_root = PathBuf::from(&config.assets.root).canonicalize().ok();
        let hello_image = PathBuf::from(&config.assets.hello_image);

        Self {
            config,
            asset_root,
            hello_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn missing_asset_root_is_tolerated() {
        let mut config = test_config();
        config.assets.root = "/nonexistent/spa-dist".to_string();
        let state = AppState::new(config);
        assert!(state.asset_root.is_none());
    }

    #[test]
    fn asset_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.assets.root = dir.path().to_string_lossy().into_owned();
        let state = AppState::new(config);
        let root = state.asset_root.expect("root should resolve");
        assert!(root.is_absolute());
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }
}
