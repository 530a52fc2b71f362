// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::resources::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single synchronization call. None of these are retried.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{kind} has an invalid identity (name: {name:?}, namespace: {namespace:?})")]
    InvalidIdentity {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },

    #[error("List {kind}s for {name} failed: {source}")]
    List {
        kind: ResourceKind,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Create {kind} {name} failed: {source}")]
    Create {
        kind: ResourceKind,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Apply {kind} {name} failed: {source}")]
    Apply {
        kind: ResourceKind,
        name: String,
        #[source]
        source: kube::Error,
    },
}

impl SyncError {
    pub fn kind(&self) -> ResourceKind {
        match self {
            SyncError::InvalidIdentity { kind, .. }
            | SyncError::List { kind, .. }
            | SyncError::Create { kind, .. }
            | SyncError::Apply { kind, .. } => *kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SyncError::InvalidIdentity { name, .. }
            | SyncError::List { name, .. }
            | SyncError::Create { name, .. }
            | SyncError::Apply { name, .. } => name,
        }
    }
}

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("{failed} of {total} resources failed to synchronize")]
    SyncFailed { failed: usize, total: usize },

    #[error("Kubeconfig error: {0}")]
    KubeconfigError(String),

    #[error("Namespace creation failed: {0}")]
    NamespaceError(String),

    #[error("Failed to render template {name}: {source}")]
    TemplateError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Invalid manifest {name}: {source}")]
    ManifestError {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InstallerError>;
