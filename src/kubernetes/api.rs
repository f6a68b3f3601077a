// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The cluster operations the reaper needs, independent of how they reach the API server.

use crate::error::ApiResult;
use crate::types::{ResourceCoordinate, ResourceKind};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::api::DynamicObject;

/// List, Delete and Patch against arbitrary resource kinds, plus discovery.
///
/// Every call blocks the caller until the API server has answered. Failures
/// are classified so callers can tell "already gone" apart from real errors.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Resource lists for the preferred version of every API group, core included
    async fn server_preferred_namespaced_resources(&self) -> ApiResult<Vec<APIResourceList>>;

    /// List instances of `kind`, in one namespace or cluster-wide
    async fn list(&self, kind: &ResourceKind, namespace: Option<&str>)
        -> ApiResult<Vec<DynamicObject>>;

    async fn delete(&self, target: &ResourceCoordinate) -> ApiResult<()>;

    /// Apply an RFC 6902 JSON Patch document to `target`
    async fn patch(&self, target: &ResourceCoordinate, json_patch: &serde_json::Value)
        -> ApiResult<()>;
}
