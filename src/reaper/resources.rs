// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Purging the contents of terminating namespaces.

use crate::error::{ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::reaper::finalizers::{strip_finalizers, FinalizerPolicy};
use crate::reaper::namespaces::list_stuck_namespaces;
use crate::types::ResourceKind;
use kube::api::DynamicObject;
use kube::ResourceExt;
use tracing::{debug, info, instrument};

/// `apiVersion` and `kind` for the audit record, preferring what the object says about itself
fn type_of(object: &DynamicObject, kind: &ResourceKind) -> (String, String) {
    match &object.types {
        Some(types) if !types.api_version.is_empty() && !types.kind.is_empty() => {
            (types.api_version.clone(), types.kind.clone())
        }
        _ => (kind.api_version(), kind.kind.clone()),
    }
}

/// Delete every instance of every kind in `namespace`, then strip its finalizers.
///
/// Kinds that cannot be listed, and instances that cannot be deleted, are skipped.
/// An instance that is already gone still has its finalizers stripped. Any other
/// failure stops the namespace.
#[instrument(skip(api, kinds), fields(kinds = kinds.len()))]
pub async fn reap_namespace<C: ClusterApi + ?Sized>(
    api: &C,
    namespace: &str,
    kinds: &[ResourceKind],
    policy: FinalizerPolicy,
) -> Result<()> {
    for kind in kinds {
        let objects = match api.list(kind, Some(namespace)).await {
            Ok(objects) => objects,
            Err(e) if e.is_method_not_supported() => {
                debug!("Listing {} is not supported, skipping", kind);
                continue;
            }
            Err(source) => {
                return Err(ReaperError::ListError {
                    resource: format!("{} in namespace {}", kind, namespace),
                    source,
                })
            }
        };

        for object in &objects {
            let name = object.name_any();
            let target = kind.coordinate(Some(namespace), &name);

            match api.delete(&target).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => debug!("{} already gone", target),
                Err(e) if e.is_method_not_supported() => {
                    debug!("Deleting {} is not supported, skipping", target);
                    continue;
                }
                Err(source) => {
                    return Err(ReaperError::DeleteError {
                        target: target.to_string(),
                        source,
                    })
                }
            }

            // A delete on a finalized object only marks it; the strip lets it go.
            strip_finalizers(api, &target, policy).await?;

            let (api_version, kind_name) = type_of(object, kind);
            info!(
                "Deleted {}/{} resource of kind {}/{}",
                namespace, name, api_version, kind_name
            );
        }
    }

    Ok(())
}

/// Reap every terminating namespace in turn, stopping at the first that fails
#[instrument(skip(api, kinds))]
pub async fn reap_all_stuck<C: ClusterApi + ?Sized>(
    api: &C,
    kinds: &[ResourceKind],
    policy: FinalizerPolicy,
) -> Result<()> {
    let stuck = list_stuck_namespaces(api).await?;
    info!("Found {} stuck namespaces", stuck.len());

    for namespace in &stuck {
        reap_namespace(api, namespace, kinds, policy)
            .await
            .map_err(|e| ReaperError::NamespaceCleanupError {
                namespace: namespace.clone(),
                source: Box::new(e),
            })?;
    }

    Ok(())
}
