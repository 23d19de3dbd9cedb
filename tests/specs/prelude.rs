// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the workspace specs.

use std::path::PathBuf;
use std::time::Duration;

pub use axum::http::StatusCode;
pub use serde_json::{json, Value};

use axum::body::{Body, Bytes};
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;
use jc_daemon::{router, AppState};
use jc_engine::{DotRenderer, JobControl};
use tempfile::TempDir;
use tower::ServiceExt;

/// extract → transform → load, plus an unrelated failing job.
pub const JOBS: &str = "\
jobs:
  - id: extract
    title: Extract
    function: jobcontrol.builtins:noop
    kwargs:
      rows: 3
  - id: transform
    function: jobcontrol.builtins:noop
    dependencies: [extract]
    args: [!retval extract]
  - id: load
    function: jobcontrol.builtins:noop
    dependencies: [extract, transform]
    protected: true
  - id: broken
    function: jobcontrol.builtins:fail
    args: [disk full]
";

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let storage = dir.path().join("state.json.zst");
        let config = format!("storage: file://{}\n{JOBS}", storage.display());
        std::fs::write(dir.path().join("jobcontrol.yml"), config).unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("jobcontrol.yml")
    }

    /// A fresh control over the same config and storage file.
    pub fn control(&self) -> JobControl {
        JobControl::from_config_file(&self.config_path()).unwrap()
    }

    /// Build jobs in order, one at a time.
    pub async fn build(&self, jobs: &[&str]) {
        let control = self.control();
        for job in jobs {
            // Keep end timestamps strictly increasing
            tokio::time::sleep(Duration::from_millis(5)).await;
            control.build_job(job).await.unwrap();
        }
    }

    /// Router over a freshly opened control. Graphviz is never available.
    pub fn app(&self) -> Router {
        let renderer = DotRenderer::new(self.dir.path().join("no-such-dot"));
        router(AppState::new(self.control(), renderer))
    }
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Bytes) {
    let response = app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
