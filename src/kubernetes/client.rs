// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and the per-kind client handle used by the synchronizer

use crate::error::{InstallerError, Result};
use crate::resources::SyncTarget;
use async_trait::async_trait;
use kube::{
    api::{ListParams, Patch, PatchParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client,
};
use std::path::Path;
use tracing::{debug, info, instrument};

/// The three verbs the synchronizer needs for one kind in one namespace.
///
/// This trait abstracts the cluster API for testability.
#[async_trait]
pub trait ResourceClient<K: Send + Sync>: Send + Sync {
    /// Namespace every call of this handle is scoped to
    fn namespace(&self) -> &str;

    /// All objects of the kind currently in the namespace
    async fn list(&self) -> std::result::Result<Vec<K>, kube::Error>;

    /// Create `object`, recording `field_manager` as the owner of every field it sets
    async fn create(&self, field_manager: &str, object: &K) -> std::result::Result<K, kube::Error>;

    /// Server-side apply of `object` under `field_manager`
    async fn apply(
        &self,
        name: &str,
        field_manager: &str,
        object: &K,
    ) -> std::result::Result<K, kube::Error>;
}

/// [`ResourceClient`] backed by the Kubernetes API
pub struct KubeResourceClient<K> {
    api: Api<K>,
    namespace: String,
}

impl<K: SyncTarget> KubeResourceClient<K> {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl<K: SyncTarget> ResourceClient<K> for KubeResourceClient<K> {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn list(&self) -> std::result::Result<Vec<K>, kube::Error> {
        let list = self.api.list(&ListParams::default()).await?;
        debug!(
            "Listed {} {}s in {}",
            list.items.len(),
            K::KIND,
            self.namespace
        );
        Ok(list.items)
    }

    async fn create(&self, field_manager: &str, object: &K) -> std::result::Result<K, kube::Error> {
        let pp = PostParams {
            field_manager: Some(field_manager.to_string()),
            ..Default::default()
        };
        self.api.create(&pp, object).await
    }

    async fn apply(
        &self,
        name: &str,
        field_manager: &str,
        object: &K,
    ) -> std::result::Result<K, kube::Error> {
        // Forced so fields this manager first wrote through create are taken over by the apply
        let pp = PatchParams::apply(field_manager).force();
        self.api.patch(name, &pp, &Patch::Apply(object)).await
    }
}

/// Create a client for the cluster the control plane is installed into.
///
/// Uses the given kubeconfig file, or infers the configuration (KUBECONFIG,
/// ~/.kube/config, in-cluster) when none is given.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let Some(path) = kubeconfig else {
        return Ok(Client::try_default().await?);
    };

    info!("Loading kubeconfig from {}", path.display());

    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        InstallerError::KubeconfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    let client_config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| InstallerError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    Client::try_from(client_config)
        .map_err(|e| InstallerError::KubeconfigError(format!("Failed to create client: {}", e)))
}
