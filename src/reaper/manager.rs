// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sequencing of the reclamation phases.

use crate::kubernetes::{discover_namespaced_kinds, ClusterApi};
use crate::reaper::apiservices::reap_orphan_api_services;
use crate::reaper::finalizers::FinalizerPolicy;
use crate::reaper::namespaces::{force_complete_stuck_namespaces, schedule_deletion, select_namespaces};
use crate::reaper::resources::reap_all_stuck;
use crate::types::InclusionFilter;
use anyhow::Context;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Runs one reclamation pass over the cluster.
///
/// Phases are separated by a cool-down so the cluster's own controllers can
/// catch up before the next, more forceful, phase.
pub struct Reclaimer<C> {
    api: C,
    filter: InclusionFilter,
    policy: FinalizerPolicy,
    cool_down: Duration,
}

impl<C: ClusterApi> Reclaimer<C> {
    pub fn new(api: C, filter: InclusionFilter, policy: FinalizerPolicy, cool_down: Duration) -> Self {
        Self {
            api,
            filter,
            policy,
            cool_down,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Scheduling namespaces for deletion");
        let namespaces = select_namespaces(&self.api, &self.filter)
            .await
            .context("error scheduling namespaces for deletion")?;
        schedule_deletion(&self.api, &namespaces)
            .await
            .context("error scheduling namespaces for deletion")?;
        self.cool_down().await;

        info!("Deleting orphan APIService resources");
        reap_orphan_api_services(&self.api)
            .await
            .context("error deleting orphan APIs")?;
        self.cool_down().await;

        info!("Cleaning resources inside stuck namespaces");
        let kinds = discover_namespaced_kinds(&self.api)
            .await
            .context("error cleaning stuck namespaces")?;
        reap_all_stuck(&self.api, &kinds, self.policy)
            .await
            .context("error cleaning stuck namespaces")?;
        self.cool_down().await;

        info!("Deleting namespaces by using force");
        force_complete_stuck_namespaces(&self.api, self.policy)
            .await
            .context("error deleting namespaces by force")?;

        info!("Scheduled namespaces have been deleted");
        Ok(())
    }

    async fn cool_down(&self) {
        if self.cool_down.is_zero() {
            return;
        }
        info!("Waiting prudential time between strategies: {:?}", self.cool_down);
        sleep(self.cool_down).await;
    }
}
