// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation and the `kube::Client` backed [`ClusterApi`].

use crate::config::{Config, ConnectionMode};
use crate::error::{ApiError, ApiErrorKind, ApiResult, ReaperError, Result};
use crate::kubernetes::ClusterApi;
use crate::types::{ResourceCoordinate, ResourceKind};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::{
    api::{DeleteParams, DynamicObject, ListParams, Patch, PatchParams},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config as KConfig,
};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client according to the configured connection mode
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = match config.connection_mode {
        ConnectionMode::Incluster => KConfig::incluster().map_err(|e| {
            ReaperError::KubeconfigError(format!("Failed to load in-cluster config: {}", e))
        })?,
        ConnectionMode::Kubectl => match &config.kubeconfig {
            Some(path) => {
                info!("Loading kubeconfig from {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    ReaperError::KubeconfigError(format!("Failed to read kubeconfig: {}", e))
                })?;
                KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(|e| {
                        ReaperError::KubeconfigError(format!("Failed to create config: {}", e))
                    })?
            }
            None => KConfig::infer().await.map_err(|e| {
                ReaperError::KubeconfigError(format!("Failed to infer config: {}", e))
            })?,
        },
    };

    Client::try_from(client_config)
        .map_err(|e| ReaperError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// [`ClusterApi`] over a live API server.
#[derive(Clone)]
pub struct KubeClusterApi {
    client: Client,
}

impl KubeClusterApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, kind: &ResourceKind, namespace: Option<&str>) -> Api<DynamicObject> {
        let ar = kind.api_resource();
        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        }
    }

    fn api_for(&self, target: &ResourceCoordinate) -> Api<DynamicObject> {
        let ar = target.api_resource();
        match target.namespace.as_deref() {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        }
    }
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    #[instrument(skip(self))]
    async fn server_preferred_namespaced_resources(&self) -> ApiResult<Vec<APIResourceList>> {
        let mut lists = Vec::new();

        let core = self.client.list_core_api_versions().await?;
        if let Some(version) = core.versions.first() {
            debug!("Discovering core API resources for {}", version);
            lists.push(self.client.list_core_api_resources(version).await?);
        }

        let groups = self.client.list_api_groups().await?;
        for group in groups.groups {
            let Some(preferred) = group
                .preferred_version
                .or_else(|| group.versions.into_iter().next())
            else {
                continue;
            };
            debug!("Discovering API resources for {}", preferred.group_version);
            lists.push(
                self.client
                    .list_api_group_resources(&preferred.group_version)
                    .await?,
            );
        }

        Ok(lists)
    }

    async fn list(
        &self,
        kind: &ResourceKind,
        namespace: Option<&str>,
    ) -> ApiResult<Vec<DynamicObject>> {
        let list = self
            .api(kind, namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list.items)
    }

    async fn delete(&self, target: &ResourceCoordinate) -> ApiResult<()> {
        self.api_for(target)
            .delete(&target.name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn patch(
        &self,
        target: &ResourceCoordinate,
        json_patch: &serde_json::Value,
    ) -> ApiResult<()> {
        let document = serde_json::from_value(json_patch.clone())
            .map_err(|e| ApiError::new(ApiErrorKind::Invalid, e.to_string()))?;
        let patch: Patch<()> = Patch::Json(document);

        self.api_for(target)
            .patch(&target.name, &PatchParams::default(), &patch)
            .await?;
        Ok(())
    }
}
