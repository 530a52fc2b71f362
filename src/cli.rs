// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface

use crate::bootstrap::BootstrapEmitter;
use crate::config::Config;
use crate::constants::{DEFAULT_EXAMPLES_DIR, DEFAULT_NAMESPACE};
use crate::install::install;
use crate::kubernetes::create_client;
use crate::sync::FailurePolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Provision the karmada control plane's supporting objects and emit member cluster bootstrap manifests
#[derive(Parser, Debug)]
#[command(name = "karmada-installer", version)]
pub struct Cli {
    /// Kubeconfig of the cluster hosting the control plane (defaults to the inferred config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize the control plane Secrets and Services, then write the bootstrap manifests
    Install(InstallArgs),
    /// Only write the bootstrap manifests and print the join instructions
    Examples(BootstrapArgs),
}

#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Namespace of the control plane objects
    #[arg(long, env = "KARMADA_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Directory the bootstrap manifests are written to
    #[arg(long, env = "KARMADA_EXAMPLES_DIR", default_value = DEFAULT_EXAMPLES_DIR)]
    pub examples_dir: PathBuf,

    /// Member cluster name substituted into the manifests; left as a placeholder when unset
    #[arg(long, env = "MEMBER_CLUSTER_NAME")]
    pub member_cluster_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub bootstrap: BootstrapArgs,

    /// Kubeconfig stored in the karmada-kubeconfig secret
    #[arg(long)]
    pub karmada_kubeconfig: Option<PathBuf>,

    /// Keep synchronizing the remaining objects after a failure
    #[arg(long, default_value = "false")]
    pub continue_on_error: bool,
}

impl BootstrapArgs {
    fn into_config(self) -> Config {
        Config {
            namespace: self.namespace,
            examples_dir: self.examples_dir,
            member_cluster_name: self.member_cluster_name,
            ..Config::default()
        }
    }
}

impl InstallArgs {
    fn into_config(self) -> Config {
        let failure_policy = if self.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };

        Config {
            karmada_kubeconfig: self.karmada_kubeconfig,
            failure_policy,
            ..self.bootstrap.into_config()
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match self.command {
            Command::Install(args) => {
                let config = args.into_config();
                let client = create_client(self.kubeconfig.as_deref()).await?;
                info!("Connected to Kubernetes cluster");

                let report = install(client, &config).await?;
                info!(
                    "Install complete: {} created, {} updated",
                    report.created.len(),
                    report.updated.len()
                );
                config
            }
            Command::Examples(args) => {
                let config = args.into_config();
                let emitter = BootstrapEmitter::new(&config)?;
                emitter.emit().await?;
                info!("Bootstrap manifests written to {}", emitter.output_dir().display());
                config
            }
        };

        println!("{}", BootstrapEmitter::new(&config)?.instructions()?);
        Ok(())
    }
}
