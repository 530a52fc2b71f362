// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management utilities

use crate::error::{InstallerError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// Ensure the install namespace exists, create it if it doesn't
#[instrument(skip(client))]
pub async fn ensure_namespace_exists(
    client: &Client,
    namespace: &str,
    field_manager: &str,
) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    match namespaces.get(namespace).await {
        Ok(_) => {
            debug!("Namespace {} already exists", namespace);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            info!("Creating namespace {}", namespace);
            let ns = Namespace {
                metadata: ObjectMeta {
                    name: Some(namespace.to_string()),
                    ..Default::default()
                },
                ..Default::default()
            };
            let pp = PostParams {
                field_manager: Some(field_manager.to_string()),
                ..Default::default()
            };
            namespaces.create(&pp, &ns).await.map_err(|e| {
                InstallerError::NamespaceError(format!(
                    "Failed to create namespace {}: {}",
                    namespace, e
                ))
            })?;
            info!("Namespace {} created successfully", namespace);
            Ok(())
        }
        Err(e) => Err(InstallerError::NamespaceError(format!(
            "Failed to check namespace {}: {}",
            namespace, e
        ))),
    }
}
