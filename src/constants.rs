// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The field manager used for server-side apply and recorded on create
pub const FIELD_MANAGER: &str = "karmada-installer";

/// Namespace the control plane objects are installed into by default
pub const DEFAULT_NAMESPACE: &str = "karmada-system";

/// Directory the bootstrap manifests are written to by default
pub const DEFAULT_EXAMPLES_DIR: &str = "/var/lib/karmada";

/// Kubeconfig secret consumed by the control plane components
pub mod kubeconfig {
    pub const SECRET_NAME: &str = "karmada-kubeconfig";
    /// Data key holding the kubeconfig text
    pub const SECRET_KEY: &str = "config";
}

/// Default control plane components, ports and selector labels
pub mod components {
    pub const APP_LABEL: &str = "app";

    pub const ETCD_NAME: &str = "etcd";
    pub const ETCD_CLIENT_PORT_NAME: &str = "client";
    pub const ETCD_CLIENT_PORT: i32 = 2379;
    pub const ETCD_SERVER_PORT_NAME: &str = "server";
    pub const ETCD_SERVER_PORT: i32 = 2380;

    pub const APISERVER_NAME: &str = "karmada-apiserver";
    pub const APISERVER_PORT_NAME: &str = "server";
    pub const APISERVER_PORT: i32 = 5443;

    pub const KUBE_CONTROLLER_MANAGER_NAME: &str = "kube-controller-manager";
    pub const KUBE_CONTROLLER_MANAGER_PORT_NAME: &str = "https";
    pub const KUBE_CONTROLLER_MANAGER_PORT: i32 = 10257;

    pub const WEBHOOK_NAME: &str = "karmada-webhook";
    pub const WEBHOOK_PORT_NAME: &str = "webhook";
    pub const WEBHOOK_PORT: i32 = 443;
    pub const WEBHOOK_TARGET_PORT: i32 = 8443;
}

/// Images referenced by the member cluster bootstrap manifests
pub mod images {
    pub const AGENT: &str = "swr.ap-southeast-1.myhuaweicloud.com/karmada/karmada-agent:latest";
    pub const SCHEDULER_ESTIMATOR: &str =
        "swr.ap-southeast-1.myhuaweicloud.com/karmada/karmada-scheduler-estimator:latest";
}
