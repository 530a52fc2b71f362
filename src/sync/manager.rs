// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs a batch of desired resources through the synchronizer, one at a time.

use crate::error::{InstallerError, Result, SyncError};
use crate::resources::DesiredResource;
use crate::sync::synchronizer::{SyncOutcome, Synchronizer};
use kube::Client;
use tracing::{error, info, instrument};

/// What to do with the rest of the batch once a resource fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure
    #[default]
    Abort,
    /// Keep going and report every failure at the end
    Continue,
}

/// Outcome of one batch
#[derive(Debug, Default)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub failed: Vec<SyncError>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len() + self.failed.len()
    }

    /// Turn a report with failures into an error
    pub fn ensure_success(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(InstallerError::SyncFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Sequential driver for the synchronizer.
pub struct SyncManager {
    synchronizer: Synchronizer,
    policy: FailurePolicy,
}

impl SyncManager {
    pub fn new(client: Client, policy: FailurePolicy) -> Self {
        Self {
            synchronizer: Synchronizer::new(client),
            policy,
        }
    }

    #[instrument(skip(self, resources), fields(count = resources.len(), policy = ?self.policy))]
    pub async fn run(&self, resources: Vec<DesiredResource>) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        for desired in resources {
            let label = desired.to_string();
            match self.synchronizer.sync(desired).await {
                Ok(SyncOutcome::Created) => report.created.push(label),
                Ok(SyncOutcome::Updated) => report.updated.push(label),
                Err(e) => {
                    error!("Failed to synchronize {}: {}", label, e);
                    match self.policy {
                        FailurePolicy::Abort => return Err(e.into()),
                        FailurePolicy::Continue => report.failed.push(e),
                    }
                }
            }
        }

        info!(
            "Synchronized {} resources: {} created, {} updated, {} failed",
            report.total(),
            report.created.len(),
            report.updated.len(),
            report.failed.len()
        );

        Ok(report)
    }
}
