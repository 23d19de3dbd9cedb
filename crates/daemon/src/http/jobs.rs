// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jc_core::{Clock, JobDocs, JobId};
use jc_engine::placeholder_svg;
use jc_wire::{BuildDetail, BuildListQuery, DepgraphQuery, GraphFormat, JobDetail, JobSummary};

use super::views::{ids, job_detail, job_summary};
use super::{ApiError, AppState};

const SVG: &str = "image/svg+xml";
const DOT: &str = "text/vnd.graphviz; charset=utf-8";
const YAML: &str = "application/yaml; charset=utf-8";

pub(super) async fn list<C: Clock>(State(state): State<AppState<C>>) -> Result<Json<Vec<JobSummary>>, ApiError> {
    let jobs: Vec<JobSummary> =
        state.control.iter_jobs().map(|job| job_summary(&job)).collect::<Result<_, _>>()?;
    Ok(Json(jobs))
}

pub(super) async fn show<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<JobDetail>, ApiError> {
    Ok(Json(job_detail(&state.control.get_job(&id)?)?))
}

pub(super) async fn deps<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<JobId>>, ApiError> {
    Ok(Json(ids(&state.control.get_job(&id)?.get_deps())))
}

pub(super) async fn revdeps<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<JobId>>, ApiError> {
    Ok(Json(ids(&state.control.get_job(&id)?.get_revdeps())))
}

pub(super) async fn latest_successful_build<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<Option<BuildDetail>>, ApiError> {
    let build = state.control.get_job(&id)?.get_latest_successful_build()?;
    let detail = match build {
        Some(build) => Some(BuildDetail::new(build.build(), build.retval_repr().await)),
        None => None,
    };
    Ok(Json(detail))
}

/// Builds of a job, newest first unless `order=asc`.
pub(super) async fn builds<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Query(query): Query<BuildListQuery>,
) -> Result<Json<Vec<BuildDetail>>, ApiError> {
    let job = state.control.get_job(&id)?;
    let builds = job.iter_builds(&query.filter(), query.order(), Some(query.limit()))?;
    Ok(Json(builds.iter().map(|b| BuildDetail::new(b.build(), None)).collect()))
}

pub(super) async fn conf<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let yaml = state.control.get_job(&id)?.get_conf_as_yaml()?;
    Ok(([(header::CONTENT_TYPE, YAML)], yaml).into_response())
}

pub(super) async fn docs<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<JobDocs>, ApiError> {
    Ok(Json(state.control.get_job(&id)?.get_docs()))
}

/// Dependency graph image. When the renderer is unavailable the response
/// is a placeholder image with status 503, so pages embedding it degrade.
pub(super) async fn depgraph<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Query(query): Query<DepgraphQuery>,
) -> Result<Response, ApiError> {
    let graph = state.control.job_depgraph(&id, query.complete.unwrap_or(false))?;
    let dot = state.control.depgraph_dot(&graph, Some(&id))?;
    if query.fmt == GraphFormat::Dot {
        return Ok(([(header::CONTENT_TYPE, DOT)], dot).into_response());
    }
    match state.renderer.render_svg(&dot).await {
        Ok(svg) => Ok(([(header::CONTENT_TYPE, SVG)], svg).into_response()),
        Err(e) => {
            tracing::warn!(job_id = %id, error = %e, "depgraph rendering failed");
            let placeholder = placeholder_svg(&e.to_string());
            Ok((StatusCode::SERVICE_UNAVAILABLE, [(header::CONTENT_TYPE, SVG)], placeholder).into_response())
        }
    }
}
