// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: the cluster API seam, client creation and resource discovery.

pub mod api;
pub mod client;
pub mod discovery;

pub use api::ClusterApi;
pub use client::{create_client, KubeClusterApi};
pub use discovery::discover_namespaced_kinds;
