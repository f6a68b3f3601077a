// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default cool-down between phases, giving the cluster's own controllers time to converge
pub const DEFAULT_DURATION: &str = "30s";

/// Finalizer removal patch
pub mod patch {
    /// Content type of an RFC 6902 JSON Patch request
    pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";
    /// Path of the finalizer list inside any object
    pub const FINALIZERS_PATH: &str = "/metadata/finalizers";
}
