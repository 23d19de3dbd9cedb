// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP interface: read-only JSON views over jobs and builds.

mod builds;
mod error;
mod jobs;
pub mod views;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use jc_core::{Clock, SystemClock};
use jc_engine::{GraphRenderer, JobControl};
use serde_json::{json, Value};

/// Shared state of every handler.
pub struct AppState<C: Clock = SystemClock> {
    pub control: Arc<JobControl<C>>,
    pub renderer: Arc<dyn GraphRenderer>,
}

impl<C: Clock> AppState<C> {
    pub fn new(control: JobControl<C>, renderer: impl GraphRenderer + 'static) -> Self {
        Self { control: Arc::new(control), renderer: Arc::new(renderer) }
    }
}

impl<C: Clock> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self { control: Arc::clone(&self.control), renderer: Arc::clone(&self.renderer) }
    }
}

pub fn router<C: Clock>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/jobs", get(jobs::list::<C>))
        .route("/jobs/{id}", get(jobs::show::<C>))
        .route("/jobs/{id}/deps", get(jobs::deps::<C>))
        .route("/jobs/{id}/revdeps", get(jobs::revdeps::<C>))
        .route("/jobs/{id}/latest_successful_build", get(jobs::latest_successful_build::<C>))
        .route("/jobs/{id}/builds", get(jobs::builds::<C>))
        .route("/jobs/{id}/conf", get(jobs::conf::<C>))
        .route("/jobs/{id}/docs", get(jobs::docs::<C>))
        .route("/jobs/{id}/depgraph", get(jobs::depgraph::<C>))
        .route("/builds/{id}", get(builds::show::<C>))
        .route("/builds/{id}/progress", get(builds::progress::<C>))
        .route("/builds/{id}/logs", get(builds::logs::<C>))
        .fallback(error::not_found)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": crate::env::VERSION }))
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
