// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable interpolation in configuration text

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

// Regex pattern for ${VAR:-default} environment variable expansion
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+):-([^}]*)\}").expect("constant regex pattern is valid"));

/// Regex pattern for ${secret.NAME}
#[allow(clippy::expect_used)]
static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{secret\.([a-zA-Z_][a-zA-Z0-9_-]*)\}").expect("constant regex pattern is valid")
});

/// Expand `${VAR:-default}` from the process environment.
///
/// Runs on the raw file text before YAML parsing. Anything else that looks
/// like a placeholder, `${secret.NAME}` included, is left as-is.
pub fn expand_env(text: &str) -> String {
    ENV_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = &caps[2];
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string()
}

/// Replace `${secret.NAME}` with the configured secret value.
///
/// Used on argument strings right before a function runs, so secrets never
/// show up in displayed configuration. Unknown secrets are left as-is.
pub fn interpolate_secrets(text: &str, secrets: &BTreeMap<String, String>) -> String {
    SECRET_PATTERN
        .replace_all(text, |caps: &regex::Captures| match secrets.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
