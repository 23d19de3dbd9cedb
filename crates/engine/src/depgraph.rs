// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency graphs between jobs.
//!
//! A graph maps each job to the jobs it depends on. Maps keep insertion
//! order so rendering the same configuration twice gives the same output.

use crate::error::EngineError;
use indexmap::{IndexMap, IndexSet};
use jc_config::ControlConfig;
use jc_core::JobId;

pub type DepGraph = IndexMap<JobId, Vec<JobId>>;

/// Graph of `job` and everything it transitively depends on.
///
/// With `complete`, jobs transitively depending on `job` (and their own
/// dependencies) are included as well.
pub fn job_depgraph(config: &ControlConfig, job: &str, complete: bool) -> DepGraph {
    let mut graph = DepGraph::new();
    let mut processed = IndexSet::new();
    explore(config, &JobId::new(job), complete, &mut processed, &mut graph);
    graph
}

fn explore(
    config: &ControlConfig,
    job: &JobId,
    complete: bool,
    processed: &mut IndexSet<JobId>,
    graph: &mut DepGraph,
) {
    if !processed.insert(job.clone()) {
        return;
    }
    let deps: Vec<JobId> = config.get_job_deps(job).into_iter().cloned().collect();
    graph.insert(job.clone(), deps.clone());
    for dep in &deps {
        explore(config, dep, complete, processed, graph);
    }
    if complete {
        let revdeps: Vec<JobId> = config.get_job_revdeps(job).into_iter().cloned().collect();
        for revdep in &revdeps {
            explore(config, revdep, complete, processed, graph);
        }
    }
}

/// Graph of every configured job.
pub fn full_depgraph(config: &ControlConfig) -> DepGraph {
    config.jobs().map(|job| (job.id.clone(), job.dependencies.clone())).collect()
}

/// Jobs to build for `job`, dependencies first, ending with `job` itself.
///
/// Jobs missing from the graph are treated as having no dependencies.
pub fn resolve_deps(graph: &DepGraph, job: &str) -> Result<Vec<JobId>, EngineError> {
    let mut order = Vec::new();
    let mut done = IndexSet::new();
    let mut path = Vec::new();
    visit(graph, &JobId::new(job), &mut done, &mut path, &mut order)?;
    Ok(order)
}

fn visit(
    graph: &DepGraph,
    job: &JobId,
    done: &mut IndexSet<JobId>,
    path: &mut Vec<JobId>,
    order: &mut Vec<JobId>,
) -> Result<(), EngineError> {
    if done.contains(job) {
        return Ok(());
    }
    if let Some(pos) = path.iter().position(|p| p == job) {
        let mut cycle = path[pos..].to_vec();
        cycle.push(job.clone());
        return Err(EngineError::DependencyCycle(cycle));
    }
    path.push(job.clone());
    for dep in graph.get(job).map(Vec::as_slice).unwrap_or_default() {
        visit(graph, dep, done, path, order)?;
    }
    path.pop();
    done.insert(job.clone());
    order.push(job.clone());
    Ok(())
}

#[cfg(test)]
#[path = "depgraph_tests.rs"]
mod tests;
