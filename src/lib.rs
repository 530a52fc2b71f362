// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod install;
pub mod kubernetes;
pub mod resources;
pub mod sync;

#[cfg(test)]
mod test_utils;

pub use cli::Cli;
