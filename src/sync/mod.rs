// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource synchronization: the per-object create-or-apply protocol and the batch driver.

pub mod manager;
pub mod synchronizer;

pub use manager::{FailurePolicy, SyncManager, SyncReport};
pub use synchronizer::{synchronize, SyncOutcome, SyncResult, Synchronizer};
