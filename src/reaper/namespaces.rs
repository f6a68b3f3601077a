// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace selection, deletion scheduling, stuck detection and forced completion.

use crate::error::{ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::reaper::finalizers::{strip_finalizers, FinalizerPolicy};
use crate::types::{InclusionFilter, ResourceCoordinate, ResourceKind};
use kube::api::DynamicObject;
use kube::ResourceExt;
use tracing::{debug, info, instrument};

async fn list_namespaces<C: ClusterApi + ?Sized>(api: &C) -> Result<Vec<DynamicObject>> {
    api.list(&ResourceKind::namespaces(), None)
        .await
        .map_err(|source| ReaperError::ListError {
            resource: "namespaces".to_string(),
            source,
        })
}

/// Names of every namespace in the cluster, in list order
pub async fn list_namespace_names<C: ClusterApi + ?Sized>(api: &C) -> Result<Vec<String>> {
    Ok(list_namespaces(api)
        .await?
        .iter()
        .map(|ns| ns.name_any())
        .collect())
}

/// A namespace with a deletion timestamp is terminating
pub fn is_terminating(namespace: &DynamicObject) -> bool {
    namespace.metadata.deletion_timestamp.is_some()
}

/// Names of namespaces that are mid-termination, in list order
#[instrument(skip(api))]
pub async fn list_stuck_namespaces<C: ClusterApi + ?Sized>(api: &C) -> Result<Vec<String>> {
    let stuck: Vec<String> = list_namespaces(api)
        .await?
        .iter()
        .filter(|ns| is_terminating(ns))
        .map(|ns| ns.name_any())
        .collect();

    debug!("Found {} terminating namespaces", stuck.len());
    Ok(stuck)
}

/// Resolve the working set: live namespaces when `include_all`, `include` otherwise, minus `ignore`
#[instrument(skip(api))]
pub async fn select_namespaces<C: ClusterApi + ?Sized>(
    api: &C,
    filter: &InclusionFilter,
) -> Result<Vec<String>> {
    let selected = if filter.include_all {
        filter.apply(list_namespace_names(api).await?)
    } else {
        filter.apply(filter.include.iter().cloned())
    };

    info!("Selected {} namespaces: {}", selected.len(), selected.join(", "));
    Ok(selected)
}

/// Issue a delete for every name. A namespace that no longer exists, or is already
/// terminating (the API server answers with a conflict), counts as scheduled; any
/// other failure stops the loop, leaving earlier deletions in place.
#[instrument(skip(api, names))]
pub async fn schedule_deletion<C: ClusterApi + ?Sized>(api: &C, names: &[String]) -> Result<()> {
    for name in names {
        let target = ResourceCoordinate::namespace(name);
        match api.delete(&target).await {
            Ok(()) => info!("Scheduled namespace {} for deletion", name),
            Err(e) if e.is_not_found() => debug!("Namespace {} already gone", name),
            Err(e) if e.is_conflict() => debug!("Namespace {} already terminating: {}", name, e),
            Err(source) => {
                return Err(ReaperError::DeleteError {
                    target: target.to_string(),
                    source,
                })
            }
        }
    }
    Ok(())
}

/// Strip the finalizers of every namespace still terminating, re-listed fresh
#[instrument(skip(api))]
pub async fn force_complete_stuck_namespaces<C: ClusterApi + ?Sized>(
    api: &C,
    policy: FinalizerPolicy,
) -> Result<()> {
    let stuck = list_stuck_namespaces(api).await?;

    for namespace in &stuck {
        strip_finalizers(api, &ResourceCoordinate::namespace(namespace), policy).await?;
        info!("Deleted namespace {}", namespace);
    }
    Ok(())
}
