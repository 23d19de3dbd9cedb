// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jc_core::{BuildId, JobId};
use jc_storage::StorageError;

#[yare::parameterized(
    not_found   = { ErrorKind::NotFound,    StatusCode::NOT_FOUND },
    malformed   = { ErrorKind::Malformed,   StatusCode::UNPROCESSABLE_ENTITY },
    conflict    = { ErrorKind::Conflict,    StatusCode::CONFLICT },
    unavailable = { ErrorKind::Unavailable, StatusCode::SERVICE_UNAVAILABLE },
    internal    = { ErrorKind::Internal,    StatusCode::INTERNAL_SERVER_ERROR },
)]
fn kinds_map_to_statuses(kind: ErrorKind, status: StatusCode) {
    assert_eq!(status_for(kind), status);
}

#[test]
fn engine_errors_keep_their_message() {
    let err = ApiError::from(EngineError::Storage(StorageError::BuildNotFound(BuildId(4))));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.body.kind, ErrorKind::NotFound);
    assert!(err.body.error.contains('4'));

    let err = ApiError::from(EngineError::MissingDependencies {
        job: JobId::new("load"),
        missing: vec![JobId::new("extract")],
    });
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(err.body.error.contains("extract"));
}
