// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret builders and ownership

use super::{owned_metadata, ResourceKind, SyncTarget};
use crate::constants::kubeconfig;
use crate::error::{InstallerError, Result};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{api::ObjectMeta, config::Kubeconfig};
use std::collections::BTreeMap;

/// Build a Secret of `secret_type` holding `data`
pub fn secret_from_spec(
    namespace: &str,
    name: &str,
    secret_type: &str,
    data: BTreeMap<String, String>,
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        type_: Some(secret_type.to_string()),
        data: Some(
            data.into_iter()
                .map(|(k, v)| (k, ByteString(v.into_bytes())))
                .collect(),
        ),
        ..Default::default()
    }
}

/// Reject text that is not a usable kubeconfig.
///
/// Every `Kubeconfig` field is optional, so a successful parse alone accepts
/// any YAML mapping.
fn validate_kubeconfig(name: &str, text: &str) -> Result<()> {
    let invalid = |reason: String| {
        InstallerError::KubeconfigError(format!(
            "Kubeconfig for secret {} is invalid: {}",
            name, reason
        ))
    };

    let config: Kubeconfig = serde_yaml::from_str(text).map_err(|e| invalid(e.to_string()))?;

    if let Some(kind) = config.kind.as_deref().filter(|kind| *kind != "Config") {
        return Err(invalid(format!("kind is {}, expected Config", kind)));
    }
    if config.clusters.is_empty() {
        return Err(invalid("no clusters defined".to_string()));
    }
    if config.contexts.is_empty() {
        return Err(invalid("no contexts defined".to_string()));
    }
    Ok(())
}

/// Build the Secret holding a kubeconfig under the `config` key.
///
/// The text must be a kubeconfig with at least one cluster and one context.
pub fn kubeconfig_secret(namespace: &str, name: &str, text: &str) -> Result<Secret> {
    validate_kubeconfig(name, text)?;

    Ok(secret_from_spec(
        namespace,
        name,
        "Opaque",
        BTreeMap::from([(kubeconfig::SECRET_KEY.to_string(), text.to_string())]),
    ))
}

impl SyncTarget for Secret {
    const KIND: ResourceKind = ResourceKind::Secret;
    const OWNED_FIELDS: &'static [&'static str] = &["metadata.labels", "type", "data", "stringData"];
    const CARRIED_FIELDS: &'static [&'static str] = &["immutable"];

    fn apply_payload(&self, existing: &Self) -> Self {
        Secret {
            metadata: owned_metadata(&self.metadata),
            type_: self.type_.clone(),
            data: self.data.clone(),
            string_data: self.string_data.clone(),
            immutable: existing.immutable.or(self.immutable),
        }
    }
}
