//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vidrop-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vidrop_api::setup::{build_state, routes};
use vidrop_core::{Config, UploadServiceConfig};

/// Test application: server plus the scratch directory it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Directory local uploads land in
    pub fn upload_dir(&self) -> PathBuf {
        self.temp_dir.path().join("uploads")
    }

    /// Names of the files currently in the upload directory
    pub fn stored_files(&self) -> Vec<String> {
        list_files(&self.upload_dir())
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Build a config from explicit variables only; the process environment is ignored.
pub fn test_config(vars: &[(&str, String)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    let config = UploadServiceConfig::from_lookup(|key| map.get(key).cloned())
        .expect("Failed to build test config");
    let config = Config(Box::new(config));
    config.validate().expect("Invalid test config");
    config
}

/// Setup a test app with local storage in a fresh temp directory.
pub async fn setup_local_app() -> TestApp {
    setup_local_app_with(&[]).await
}

/// Same as [`setup_local_app`] with extra configuration variables.
pub async fn setup_local_app_with(extra: &[(&str, String)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut vars = vec![(
        "UPLOAD_DIR",
        temp_dir.path().join("uploads").display().to_string(),
    )];
    vars.extend(extra.iter().cloned());

    let server = build_server(test_config(&vars)).await;
    TestApp { server, temp_dir }
}

/// Setup a test app whose Cloudinary API points at `api_base_url` (a mockito server).
pub async fn setup_cloudinary_app(api_base_url: String) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(&[
        ("STORAGE_BACKEND", "cloudinary".to_string()),
        ("CLOUDINARY_CLOUD_NAME", "demo".to_string()),
        ("CLOUDINARY_API_KEY", "key123".to_string()),
        ("CLOUDINARY_API_SECRET", "secret".to_string()),
        ("CLOUDINARY_API_BASE_URL", api_base_url),
        ("CLOUDINARY_TIMEOUT_SECS", "10".to_string()),
    ]);

    let server = build_server(config).await;
    TestApp { server, temp_dir }
}

async fn build_server(config: Config) -> TestServer {
    let state = build_state(config.clone())
        .await
        .expect("Failed to build app state");
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Multipart form with a single file part in the `video` field.
pub fn video_form(file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("video", part)
}
