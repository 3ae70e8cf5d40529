#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use profile_onboarding::app::{create_app, AppState};
use profile_onboarding::config::Settings;
use profile_onboarding::services::{MemoryUserStore, UploadStore};

pub const BOUNDARY: &str = "----profile-onboarding-test-boundary";

/// The router plus handles on its in-memory dependencies.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub upload_dir: TempDir,
}

/// Build the full application over an in-memory store and a temporary upload
/// directory.
pub fn build_test_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create temp upload dir");
    let store = Arc::new(MemoryUserStore::new());
    let settings = Settings {
        upload_dir: upload_dir.path().to_path_buf(),
        ..Settings::default()
    };

    let state = AppState::new(
        store.clone(),
        UploadStore::new(upload_dir.path()),
        settings,
    );

    TestApp {
        router: create_app(state),
        store,
        upload_dir,
    }
}

pub async fn get(app: &TestApp, uri: &str) -> Response {
    app.router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_multipart(app: &TestApp, uri: &str, body: Vec<u8>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Hand-assembled `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// A complete, valid submission for `username`.
pub fn valid_profile(username: &str) -> MultipartBody {
    MultipartBody::new()
        .text("username", username)
        .text("currentPassword", "old-pass")
        .text("newPassword", "Secret#123")
        .text("profession", "Developer")
        .text("company", "Acme")
        .text("addressLine1", "1 Infinite Loop")
        .text("country", "USA")
        .text("state", "California")
        .text("city", "San Francisco")
        .text("subscription", "Pro")
        .text("newsletter", "on")
        .file("profilePhoto", "me.png", "image/png", &[0x89, b'P', b'N', b'G', 1, 2, 3])
}
