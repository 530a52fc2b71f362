// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Service builders and ownership

use super::{owned_metadata, ResourceKind, SyncTarget};
use crate::config::ComponentSpec;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;

/// Build the ClusterIP Service fronting a control plane component
pub fn service_from_component(namespace: &str, component: &ComponentSpec) -> Service {
    let ports = component
        .ports
        .iter()
        .map(|p| ServicePort {
            name: Some(p.name.clone()),
            protocol: Some("TCP".to_string()),
            port: p.port,
            target_port: Some(IntOrString::Int(p.target_port)),
            ..Default::default()
        })
        .collect();

    Service {
        metadata: ObjectMeta {
            name: Some(component.name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(component.labels.clone()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some("ClusterIP".to_string()),
            cluster_ip: component.headless.then(|| "None".to_string()),
            selector: Some(component.labels.clone()),
            ports: Some(ports),
            ..Default::default()
        }),
        ..Default::default()
    }
}

impl SyncTarget for Service {
    const KIND: ResourceKind = ResourceKind::Service;
    const OWNED_FIELDS: &'static [&'static str] = &[
        "metadata.labels",
        "spec.type",
        "spec.selector",
        "spec.ports",
    ];
    // The cluster IP is immutable once allocated
    const CARRIED_FIELDS: &'static [&'static str] = &["spec.clusterIP", "spec.clusterIPs"];

    fn apply_payload(&self, existing: &Self) -> Self {
        let desired = self.spec.as_ref();
        let current = existing.spec.as_ref();

        Service {
            metadata: owned_metadata(&self.metadata),
            spec: Some(ServiceSpec {
                type_: desired.and_then(|s| s.type_.clone()),
                selector: desired.and_then(|s| s.selector.clone()),
                ports: desired.and_then(|s| s.ports.clone()),
                cluster_ip: current
                    .and_then(|s| s.cluster_ip.clone())
                    .or_else(|| desired.and_then(|s| s.cluster_ip.clone())),
                cluster_ips: current
                    .and_then(|s| s.cluster_ips.clone())
                    .or_else(|| desired.and_then(|s| s.cluster_ips.clone())),
                ..Default::default()
            }),
            status: None,
        }
    }
}
