// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Catalog of the namespaced resource kinds the cluster currently serves.

use crate::error::{ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::types::ResourceKind;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use tracing::{info, instrument};

/// Ask the cluster for every namespaced kind in its preferred versions.
///
/// Fails when discovery fails: reaping cannot proceed without knowing what kinds exist.
#[instrument(skip(api))]
pub async fn discover_namespaced_kinds<C: ClusterApi + ?Sized>(api: &C) -> Result<Vec<ResourceKind>> {
    let lists = api
        .server_preferred_namespaced_resources()
        .await
        .map_err(ReaperError::DiscoveryError)?;

    let kinds = kinds_from_resource_lists(&lists);
    info!("Discovered {} namespaced resource kinds", kinds.len());
    Ok(kinds)
}

/// Flatten discovery lists into kinds, keeping namespaced top-level resources only
pub fn kinds_from_resource_lists(lists: &[APIResourceList]) -> Vec<ResourceKind> {
    lists
        .iter()
        .flat_map(|list| {
            let (group, version) = split_group_version(&list.group_version);
            list.resources
                .iter()
                .filter(|r| r.namespaced && !r.name.contains('/'))
                .map(move |r| ResourceKind::new(group, version, &r.kind, &r.name, &r.singular_name))
        })
        .collect()
}

/// `apps/v1` is (`apps`, `v1`); anything without exactly one `/` is a core version
pub fn split_group_version(group_version: &str) -> (&str, &str) {
    match group_version.split_once('/') {
        Some((group, version)) if !version.contains('/') => (group, version),
        _ => ("", group_version),
    }
}
