// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Stuck-namespace reclamation: the phases and the pass that sequences them.

pub mod apiservices;
pub mod finalizers;
pub mod manager;
pub mod namespaces;
pub mod resources;

pub use apiservices::reap_orphan_api_services;
pub use finalizers::{strip_finalizers, FinalizerPolicy};
pub use manager::Reclaimer;
pub use namespaces::{
    force_complete_stuck_namespaces, list_stuck_namespaces, schedule_deletion, select_namespaces,
};
pub use resources::{reap_all_stuck, reap_namespace};
