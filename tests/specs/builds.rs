// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build views, persisted across reopened controls.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn dependency_builds_are_frozen_at_creation() {
    let project = Project::new();
    project.build(&["extract", "transform", "extract"]).await;

    let (status, body) = get_json(project.app(), "/builds/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job_id"], "transform");
    assert_eq!(body["dependency_builds"], json!({ "extract": 1 }));
    assert_eq!(body["status"], "succeeded");
    assert!(body["duration_ms"].is_u64());
}

#[tokio::test]
async fn failed_build_keeps_its_exception_and_logs() {
    let project = Project::new();
    project.build(&["broken"]).await;

    let (_, body) = get_json(project.app(), "/builds/1").await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["exception"], "disk full");
    assert!(body.get("retval").is_none());

    let (status, body) = get_json(project.app(), "/builds/1/logs?level=error").await;
    assert_eq!(status, StatusCode::OK);
    let messages: Vec<&str> =
        body.as_array().unwrap().iter().map(|e| e["message"].as_str().unwrap()).collect();
    assert_eq!(messages, vec!["build failed: disk full"]);
    assert_eq!(body[0]["level"], "error");
}

#[tokio::test]
async fn progress_of_a_build_without_reports_is_indeterminate() {
    let project = Project::new();
    project.build(&["extract"]).await;
    let (status, body) = get_json(project.app(), "/builds/1/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"], 0);
    assert_eq!(body["total"], Value::Null);
    assert_eq!(body["in_progress"], false);
    assert_eq!(body["color"], "#999999");
}

#[tokio::test]
async fn deleted_builds_disappear() {
    let project = Project::new();
    project.build(&["extract"]).await;
    project.control().delete_build(jc_core::BuildId(1), true).await.unwrap();

    let (status, body) = get_json(project.app(), "/builds/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    let (_, body) = get_json(project.app(), "/jobs/extract").await;
    assert_eq!(body["status"], "not_built");
}

#[tokio::test]
async fn malformed_build_id_is_a_bad_request() {
    let project = Project::new();
    let (status, body) = get_json(project.app(), "/builds/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformed");
}
