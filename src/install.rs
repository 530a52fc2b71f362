// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One install run: namespace, control plane objects, then bootstrap manifests.

use crate::bootstrap::BootstrapEmitter;
use crate::config::Config;
use crate::constants::FIELD_MANAGER;
use crate::error::{InstallerError, Result};
use crate::kubernetes::ensure_namespace_exists;
use crate::resources::desired_resources;
use crate::sync::{SyncManager, SyncReport};
use kube::Client;
use tracing::{info, instrument};

/// Synchronize every control plane object, then write the member cluster
/// manifests. Manifests are only written when every object synchronized.
#[instrument(skip(client, config), fields(namespace = %config.namespace))]
pub async fn install(client: Client, config: &Config) -> Result<SyncReport> {
    ensure_namespace_exists(&client, &config.namespace, FIELD_MANAGER).await?;

    let kubeconfig = match &config.karmada_kubeconfig {
        Some(path) => Some(tokio::fs::read_to_string(path).await.map_err(|source| {
            InstallerError::Io {
                path: path.clone(),
                source,
            }
        })?),
        None => None,
    };

    let resources = desired_resources(
        &config.namespace,
        &config.control_plane,
        kubeconfig.as_deref(),
    )?;
    info!("Synchronizing {} control plane resources", resources.len());

    let report = SyncManager::new(client, config.failure_policy)
        .run(resources)
        .await?
        .ensure_success()?;

    BootstrapEmitter::new(config)?.emit().await?;

    Ok(report)
}
