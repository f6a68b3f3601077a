// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Removal of APIService registrations whose backend is unavailable.
//!
//! An aggregated API that no longer answers makes discovery fail and keeps
//! namespace deletion from finishing, so these go first.

use crate::error::{ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::types::{ApiServiceStatus, ResourceKind};
use kube::ResourceExt;
use tracing::{debug, info, instrument};

/// Names of APIServices reporting `Available=False`
#[instrument(skip(api))]
pub async fn list_orphan_api_services<C: ClusterApi + ?Sized>(api: &C) -> Result<Vec<String>> {
    let api_services = api
        .list(&ResourceKind::api_services(), None)
        .await
        .map_err(|source| ReaperError::ListError {
            resource: "apiservices".to_string(),
            source,
        })?;

    let mut orphans = Vec::new();
    for api_service in &api_services {
        let name = api_service.name_any();
        let status = ApiServiceStatus::from_raw(api_service.data.get("status")).map_err(|source| {
            ReaperError::StatusError {
                name: name.clone(),
                source,
            }
        })?;

        if status.is_orphan() {
            debug!("APIService {} is unavailable", name);
            orphans.push(name);
        }
    }

    Ok(orphans)
}

/// Delete every orphaned APIService; one already gone counts as deleted
#[instrument(skip(api))]
pub async fn reap_orphan_api_services<C: ClusterApi + ?Sized>(api: &C) -> Result<()> {
    let orphans = list_orphan_api_services(api).await?;
    info!("Found {} orphan APIServices", orphans.len());

    let kind = ResourceKind::api_services();
    for name in &orphans {
        let target = kind.coordinate(None, name);
        match api.delete(&target).await {
            Ok(()) => info!("Deleted orphan APIService {}", name),
            Err(e) if e.is_not_found() => debug!("APIService {} already gone", name),
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
