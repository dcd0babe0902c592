//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app owns a temporary upload root and small channel ceilings so
//! the size limits can be exercised without large payloads.

use axum_test::TestServer;
use clipnote_api::constants;
use clipnote_api::setup::{routes, services};
use clipnote_core::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEST_IMAGE_MAX_BYTES: usize = 64 * 1024;
pub const TEST_VIDEO_MAX_BYTES: usize = 256 * 1024;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server and owned upload root.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
    pub upload_root: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Sorted file names currently stored in a channel directory.
    pub fn stored_files(&self, dir_name: &str) -> Vec<String> {
        list_dir(&self.upload_root.join(dir_name))
    }
}

fn list_dir(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .map(|e| {
                    e.expect("read dir entry")
                        .file_name()
                        .to_string_lossy()
                        .into_owned()
                })
                .collect();
            names.sort();
            names
        }
        Err(_) => Vec::new(),
    }
}

/// Setup a test app backed by local storage in a temporary directory.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_root = temp_dir.path().join("public/uploads");
    let upload_root_str = upload_root.to_string_lossy().into_owned();

    let config = Config::from_vars(|key| match key {
        "UPLOAD_ROOT" => Some(upload_root_str.clone()),
        "PUBLIC_BASE_URL" => Some("http://localhost:4000/uploads".to_string()),
        "IMAGE_MAX_BYTES" => Some(TEST_IMAGE_MAX_BYTES.to_string()),
        "VIDEO_MAX_BYTES" => Some(TEST_VIDEO_MAX_BYTES.to_string()),
        _ => None,
    })
    .expect("Failed to build test config");

    let state = services::initialize_services(&config)
        .await
        .expect("Failed to initialize services");
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
        upload_root,
    }
}
