// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job views over a config file on disk.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn statuses(body: &Value) -> Vec<(String, String)> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|j| (j["id"].as_str().unwrap().to_string(), j["status"].as_str().unwrap().to_string()))
        .collect()
}

#[tokio::test]
async fn statuses_follow_the_build_history() {
    let project = Project::new();
    let (status, body) = get_json(project.app(), "/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert!(statuses(&body).iter().all(|(_, s)| s == "not_built"));

    project.build(&["extract", "transform", "load", "broken"]).await;
    let (_, body) = get_json(project.app(), "/jobs").await;
    assert_eq!(
        statuses(&body),
        vec![
            ("extract".to_string(), "success".to_string()),
            ("transform".to_string(), "success".to_string()),
            ("load".to_string(), "success".to_string()),
            ("broken".to_string(), "failed".to_string()),
        ]
    );
}

#[tokio::test]
async fn rebuilding_a_dependency_makes_dependents_outdated() {
    let project = Project::new();
    project.build(&["extract", "transform"]).await;
    let (_, body) = get_json(project.app(), "/jobs/transform").await;
    assert_eq!(body["outdated"], json!(false));

    project.build(&["extract"]).await;
    let (_, body) = get_json(project.app(), "/jobs/transform").await;
    assert_eq!(body["outdated"], json!(true));
    assert_eq!(body["status"], "outdated");
    // load was never built
    let (_, body) = get_json(project.app(), "/jobs/load").await;
    assert_eq!(body["outdated"], Value::Null);
    assert_eq!(body["can_be_built"], true);
}

#[tokio::test]
async fn job_detail_describes_the_function() {
    let project = Project::new();
    let (status, body) = get_json(project.app(), "/jobs/extract").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Extract");
    assert_eq!(body["function"], "jobcontrol.builtins:noop");
    assert_eq!(body["revdeps"], json!(["transform", "load"]));
    assert_eq!(body["latest_successful_build"], Value::Null);
    assert_eq!(body["docs"]["function_module"], "jobcontrol.builtins");
    assert_eq!(body["docs"]["function_argspec"], "(*args, **kwargs)");
}

#[tokio::test]
async fn latest_successful_build_skips_failures() {
    let project = Project::new();
    let (_, body) = get_json(project.app(), "/jobs/broken/latest_successful_build").await;
    assert_eq!(body, Value::Null);

    project.build(&["extract"]).await;
    let (_, body) = get_json(project.app(), "/jobs/extract/latest_successful_build").await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["retval"], json!({ "rows": 3 }));
    assert_eq!(body["retval_repr"], "{\"rows\": 3}");
}

#[tokio::test]
async fn build_listing_filters_and_orders() {
    let project = Project::new();
    project.build(&["extract", "broken", "extract", "broken"]).await;

    let (_, body) = get_json(project.app(), "/jobs/extract/builds").await;
    let ids: Vec<u64> = body.as_array().unwrap().iter().map(|b| b["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![3, 1]);

    let (_, body) = get_json(project.app(), "/jobs/extract/builds?order=asc&limit=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);

    let (_, body) = get_json(project.app(), "/jobs/broken/builds?success=true").await;
    assert_eq!(body, json!([]));
    let (_, body) = get_json(project.app(), "/jobs/broken/builds?success=no&finished=yes").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn conf_is_served_as_yaml() {
    let project = Project::new();
    let (status, content_type, body) = get(project.app(), "/jobs/load/conf").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/yaml"));
    let yaml = String::from_utf8(body.to_vec()).unwrap();
    assert!(yaml.contains("id: load"), "{yaml}");
    assert!(yaml.contains("protected: true"), "{yaml}");
}

#[tokio::test]
async fn depgraph_as_dot_and_unavailable_svg() {
    let project = Project::new();
    let (status, content_type, body) = get(project.app(), "/jobs/load/depgraph?fmt=dot").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/vnd.graphviz"));
    let dot = String::from_utf8(body.to_vec()).unwrap();
    assert!(dot.contains("\"extract\" -> \"transform\";"));
    assert!(dot.contains("\"transform\" -> \"load\";"));
    assert!(!dot.contains("broken"));

    let (status, content_type, body) = get(project.app(), "/jobs/load/depgraph").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(content_type.unwrap().starts_with("image/svg+xml"));
    assert!(String::from_utf8(body.to_vec()).unwrap().contains("<svg"));
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let project = Project::new();
    let (status, body) = get_json(project.app(), "/jobs/nope/builds").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}
