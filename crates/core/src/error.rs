// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared across crates.
//!
//! Each crate keeps its own error enum; all of them classify into an
//! [`ErrorKind`] so that the HTTP layer and the CLI can map failures to
//! status codes without knowing every variant.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown job or build identifier
    NotFound,
    /// Introspection or rendering backend not reachable
    Unavailable,
    /// Input or configuration that cannot be parsed or serialized
    Malformed,
    /// Operation not allowed in the current state
    Conflict,
    Internal,
}

crate::simple_display! {
    ErrorKind {
        NotFound => "not_found",
        Unavailable => "unavailable",
        Malformed => "malformed",
        Conflict => "conflict",
        Internal => "internal",
    }
}
