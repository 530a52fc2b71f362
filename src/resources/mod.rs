// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-state builders and the per-kind field ownership tables.

pub mod secret;
pub mod service;

use crate::config::ControlPlaneConfig;
use crate::constants::kubeconfig;
use crate::error::Result;
use k8s_openapi::api::core::v1::{Secret, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::{api::ObjectMeta, Resource};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

pub use secret::{kubeconfig_secret, secret_from_spec};
pub use service::service_from_component;

/// Resource kinds the installer knows how to synchronize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Secret,
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Secret => f.write_str("Secret"),
            ResourceKind::Service => f.write_str("Service"),
        }
    }
}

/// A namespaced kind that can be synchronized.
///
/// Each kind declares which fields the installer owns and which it carries
/// over from the object already in the cluster. On the update path only the
/// identity, the owned fields and the carried fields are sent; everything else
/// stays with whichever writer set it.
pub trait SyncTarget:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    const KIND: ResourceKind;

    /// Always overwritten with the desired value
    const OWNED_FIELDS: &'static [&'static str];

    /// Taken from the existing object when it has them, otherwise from the desired object
    const CARRIED_FIELDS: &'static [&'static str];

    /// Build the server-side apply payload for updating `existing` towards `self`.
    fn apply_payload(&self, existing: &Self) -> Self;
}

/// Identity plus the owned metadata of a desired object.
///
/// Server-managed metadata (uid, resourceVersion, managedFields) must not be
/// part of an apply payload.
pub(crate) fn owned_metadata(meta: &ObjectMeta) -> ObjectMeta {
    ObjectMeta {
        name: meta.name.clone(),
        namespace: meta.namespace.clone(),
        labels: meta.labels.clone(),
        ..Default::default()
    }
}

/// One object the installer converges the cluster towards
#[derive(Debug, Clone)]
pub enum DesiredResource {
    Secret(Secret),
    Service(Service),
}

impl DesiredResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DesiredResource::Secret(_) => ResourceKind::Secret,
            DesiredResource::Service(_) => ResourceKind::Service,
        }
    }

    pub fn name(&self) -> &str {
        self.meta().name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.meta().namespace.as_deref().unwrap_or_default()
    }

    fn meta(&self) -> &ObjectMeta {
        match self {
            DesiredResource::Secret(s) => s.meta(),
            DesiredResource::Service(s) => s.meta(),
        }
    }
}

impl fmt::Display for DesiredResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind(), self.namespace(), self.name())
    }
}

impl From<Secret> for DesiredResource {
    fn from(secret: Secret) -> Self {
        DesiredResource::Secret(secret)
    }
}

impl From<Service> for DesiredResource {
    fn from(service: Service) -> Self {
        DesiredResource::Service(service)
    }
}

/// Every object one install run synchronizes, in order: the kubeconfig
/// secret (when a kubeconfig is given) followed by one Service per component.
pub fn desired_resources(
    namespace: &str,
    control_plane: &ControlPlaneConfig,
    karmada_kubeconfig: Option<&str>,
) -> Result<Vec<DesiredResource>> {
    let mut resources: Vec<DesiredResource> = Vec::with_capacity(control_plane.components.len() + 1);

    if let Some(text) = karmada_kubeconfig {
        resources.push(kubeconfig_secret(namespace, kubeconfig::SECRET_NAME, text)?.into());
    }

    resources.extend(
        control_plane
            .components
            .iter()
            .map(|component| service_from_component(namespace, component).into()),
    );

    Ok(resources)
}
