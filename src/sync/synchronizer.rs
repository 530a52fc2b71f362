// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Idempotent create-or-apply of a single desired object.

use crate::constants::FIELD_MANAGER;
use crate::error::SyncError;
use crate::kubernetes::{KubeResourceClient, ResourceClient};
use crate::resources::{DesiredResource, SyncTarget};
use kube::{Client, ResourceExt};
use std::fmt;
use tracing::{debug, info, instrument};

/// What a successful synchronization did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Created => f.write_str("created"),
            SyncOutcome::Updated => f.write_str("updated"),
        }
    }
}

pub type SyncResult = std::result::Result<SyncOutcome, SyncError>;

/// Converge one object towards `desired`.
///
/// Lists the kind in the client's namespace and looks the desired name up in
/// that fresh listing. An existing object is updated by a server-side apply
/// of the owned fields (see [`SyncTarget`]); a missing one is created. A failed
/// list issues no write. Nothing is retried.
#[instrument(
    skip(client, desired),
    fields(kind = %K::KIND, name = %desired.name_any(), namespace = client.namespace())
)]
pub async fn synchronize<K, C>(client: &C, desired: &K) -> SyncResult
where
    K: SyncTarget,
    C: ResourceClient<K> + ?Sized,
{
    let name = desired.name_any();
    let namespace = desired.namespace().unwrap_or_default();

    if name.is_empty() || namespace.is_empty() || namespace != client.namespace() {
        return Err(SyncError::InvalidIdentity {
            kind: K::KIND,
            name,
            namespace,
        });
    }

    let existing = client.list().await.map_err(|source| SyncError::List {
        kind: K::KIND,
        name: name.clone(),
        source,
    })?;

    match existing.iter().find(|o| o.name_any() == name) {
        Some(current) => {
            debug!(
                "{} {}/{} exists, applying {:?} and carrying over {:?}",
                K::KIND,
                namespace,
                name,
                K::OWNED_FIELDS,
                K::CARRIED_FIELDS
            );
            let payload = desired.apply_payload(current);
            client
                .apply(&name, FIELD_MANAGER, &payload)
                .await
                .map_err(|source| SyncError::Apply {
                    kind: K::KIND,
                    name: name.clone(),
                    source,
                })?;
            info!("{} {}/{} updated successfully", K::KIND, namespace, name);
            Ok(SyncOutcome::Updated)
        }
        None => {
            client
                .create(FIELD_MANAGER, desired)
                .await
                .map_err(|source| SyncError::Create {
                    kind: K::KIND,
                    name: name.clone(),
                    source,
                })?;
            info!("{} {}/{} created successfully", K::KIND, namespace, name);
            Ok(SyncOutcome::Created)
        }
    }
}

/// Synchronizes [`DesiredResource`]s against a cluster, binding a client
/// handle for the resource's kind and namespace on every call.
#[derive(Clone)]
pub struct Synchronizer {
    client: Client,
}

impl Synchronizer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn sync(&self, desired: DesiredResource) -> SyncResult {
        match desired {
            DesiredResource::Secret(secret) => self.sync_typed(&secret).await,
            DesiredResource::Service(service) => self.sync_typed(&service).await,
        }
    }

    async fn sync_typed<K: SyncTarget>(&self, desired: &K) -> SyncResult {
        let namespace = desired.namespace().unwrap_or_default();
        let handle = KubeResourceClient::<K>::new(self.client.clone(), &namespace);
        synchronize(&handle, desired).await
    }
}
