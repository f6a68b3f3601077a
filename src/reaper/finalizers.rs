// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Finalizer removal for any addressable object.

use crate::constants::patch::FINALIZERS_PATH;
use crate::error::{ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::types::ResourceCoordinate;
use serde_json::json;
use tracing::{debug, instrument};

/// Which finalizer patch failures still count as a stripped object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalizerPolicy {
    /// Not found (object already gone) and invalid (no finalizer list to remove) are success
    #[default]
    Lenient,
    /// Every patch failure is an error
    Strict,
}

/// JSON Patch document removing `metadata.finalizers`
pub fn finalizer_removal_patch() -> serde_json::Value {
    json!([{ "op": "remove", "path": FINALIZERS_PATH }])
}

/// Remove the finalizer list from `target`, namespaced or cluster-scoped.
#[instrument(skip(api), fields(target = %target))]
pub async fn strip_finalizers<C: ClusterApi + ?Sized>(
    api: &C,
    target: &ResourceCoordinate,
    policy: FinalizerPolicy,
) -> Result<()> {
    match api.patch(target, &finalizer_removal_patch()).await {
        Ok(()) => Ok(()),
        Err(e) if policy == FinalizerPolicy::Lenient && (e.is_not_found() || e.is_invalid()) => {
            debug!("Nothing to strip from {}: {}", target, e);
            Ok(())
        }
        Err(source) => Err(ReaperError::PatchError {
            target: target.to_string(),
            source,
        }),
    }
}
