// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::{Path, Query, State};
use axum::Json;
use jc_core::{BuildId, Clock};
use jc_wire::{BuildDetail, LogEntry, LogQuery, ProgressDto};

use super::{ApiError, AppState};

fn parse_id(raw: &str) -> Result<BuildId, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request(format!("invalid build id: {raw:?}")))
}

pub(super) async fn show<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<BuildDetail>, ApiError> {
    let build = state.control.get_build(parse_id(&id)?)?;
    let repr = build.retval_repr().await;
    Ok(Json(BuildDetail::new(build.build(), repr)))
}

pub(super) async fn progress<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
) -> Result<Json<ProgressDto>, ApiError> {
    let build = state.control.get_build(parse_id(&id)?)?;
    Ok(Json(ProgressDto::new(build.get_progress_info(), &build.get_progress_report())))
}

pub(super) async fn logs<C: Clock>(
    State(state): State<AppState<C>>,
    Path(id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let build = state.control.get_build(parse_id(&id)?)?;
    let records = build.iter_log_messages(query.level)?;
    Ok(Json(records.into_iter().map(LogEntry::from).collect()))
}
