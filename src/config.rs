// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{components::*, DEFAULT_EXAMPLES_DIR, DEFAULT_NAMESPACE};
use crate::sync::FailurePolicy;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Installer configuration for a single run
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace all control plane objects are synchronized into
    pub namespace: String,
    /// Kubeconfig stored in the control plane kubeconfig secret, if any
    pub karmada_kubeconfig: Option<PathBuf>,
    /// Where the member cluster bootstrap manifests are written
    pub examples_dir: PathBuf,
    /// Substituted into the bootstrap manifests when known
    pub member_cluster_name: Option<String>,
    pub failure_policy: FailurePolicy,
    pub control_plane: ControlPlaneConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            karmada_kubeconfig: None,
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            member_cluster_name: None,
            failure_policy: FailurePolicy::Abort,
            control_plane: ControlPlaneConfig::default(),
        }
    }
}

/// A TCP port exposed by a component's Service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: String,
    pub port: i32,
    pub target_port: i32,
}

impl PortSpec {
    pub fn new(name: &str, port: i32) -> Self {
        Self::with_target(name, port, port)
    }

    pub fn with_target(name: &str, port: i32, target_port: i32) -> Self {
        PortSpec {
            name: name.to_string(),
            port,
            target_port,
        }
    }
}

/// Labels and ports of one control plane component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Service name
    pub name: String,
    /// Used both as Service labels and as the pod selector
    pub labels: BTreeMap<String, String>,
    pub ports: Vec<PortSpec>,
    /// Headless services get `clusterIP: None`
    pub headless: bool,
}

impl ComponentSpec {
    /// Component selected by the conventional `app=<name>` label
    pub fn new(name: &str, ports: Vec<PortSpec>) -> Self {
        ComponentSpec {
            name: name.to_string(),
            labels: BTreeMap::from([(APP_LABEL.to_string(), name.to_string())]),
            ports,
            headless: false,
        }
    }

    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }
}

/// The components the installer creates Services for, in install order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPlaneConfig {
    pub components: Vec<ComponentSpec>,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        ControlPlaneConfig {
            components: vec![
                ComponentSpec::new(
                    ETCD_NAME,
                    vec![
                        PortSpec::new(ETCD_CLIENT_PORT_NAME, ETCD_CLIENT_PORT),
                        PortSpec::new(ETCD_SERVER_PORT_NAME, ETCD_SERVER_PORT),
                    ],
                )
                .headless(),
                ComponentSpec::new(
                    APISERVER_NAME,
                    vec![PortSpec::new(APISERVER_PORT_NAME, APISERVER_PORT)],
                ),
                ComponentSpec::new(
                    KUBE_CONTROLLER_MANAGER_NAME,
                    vec![PortSpec::new(
                        KUBE_CONTROLLER_MANAGER_PORT_NAME,
                        KUBE_CONTROLLER_MANAGER_PORT,
                    )],
                ),
                ComponentSpec::new(
                    WEBHOOK_NAME,
                    vec![PortSpec::with_target(
                        WEBHOOK_PORT_NAME,
                        WEBHOOK_PORT,
                        WEBHOOK_TARGET_PORT,
                    )],
                ),
            ],
        }
    }
}
