// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Member cluster bootstrap manifests and operator instructions.
//!
//! The manifests are minijinja templates. Without a member cluster name the
//! literal `{{member_cluster_name}}` is rendered in its place so the operator
//! can substitute it on the member cluster.

use crate::config::Config;
use crate::constants::images;
use crate::error::{InstallerError, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const AGENT_TEMPLATE: &str = include_str!("../../templates/karmada-agent.yaml");
const ESTIMATOR_TEMPLATE: &str = include_str!("../../templates/karmada-scheduler-estimator.yaml");
const INSTRUCTIONS_TEMPLATE: &str = include_str!("../../templates/instructions.txt");

pub const AGENT_FILE: &str = "karmada-agent.yaml";
pub const ESTIMATOR_FILE: &str = "karmada-scheduler-estimator.yaml";
const INSTRUCTIONS: &str = "instructions";

const MEMBER_CLUSTER_PLACEHOLDER: &str = "{{member_cluster_name}}";

/// Values available to every bootstrap template
#[derive(Debug, Clone, Serialize)]
struct BootstrapContext {
    namespace: String,
    agent_image: &'static str,
    estimator_image: &'static str,
    output_dir: String,
    member_cluster_name: String,
    cluster_name_given: bool,
    placeholder: &'static str,
}

impl BootstrapContext {
    fn new(config: &Config) -> Self {
        Self {
            namespace: config.namespace.clone(),
            agent_image: images::AGENT,
            estimator_image: images::SCHEDULER_ESTIMATOR,
            output_dir: config.examples_dir.display().to_string(),
            member_cluster_name: config
                .member_cluster_name
                .clone()
                .unwrap_or_else(|| MEMBER_CLUSTER_PLACEHOLDER.to_string()),
            cluster_name_given: config.member_cluster_name.is_some(),
            placeholder: MEMBER_CLUSTER_PLACEHOLDER,
        }
    }
}

fn template_error(name: &str) -> impl FnOnce(minijinja::Error) -> InstallerError + '_ {
    move |source| InstallerError::TemplateError {
        name: name.to_string(),
        source,
    }
}

/// Environment holding the bootstrap templates.
///
/// Undefined variables are errors and nothing is escaped.
fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);

    for (name, source) in [
        (AGENT_FILE, AGENT_TEMPLATE),
        (ESTIMATOR_FILE, ESTIMATOR_TEMPLATE),
        (INSTRUCTIONS, INSTRUCTIONS_TEMPLATE),
    ] {
        env.add_template(name, source).map_err(template_error(name))?;
    }
    Ok(env)
}

/// Check that every document in `manifest` is valid YAML
fn validate_yaml(name: &str, manifest: &str) -> Result<()> {
    for document in serde_yaml::Deserializer::from_str(manifest) {
        serde_yaml::Value::deserialize(document).map_err(|source| {
            InstallerError::ManifestError {
                name: name.to_string(),
                source,
            }
        })?;
    }
    Ok(())
}

/// Writes the member cluster manifests once the control plane objects are in place
pub struct BootstrapEmitter {
    output_dir: PathBuf,
    env: Environment<'static>,
    context: BootstrapContext,
}

impl BootstrapEmitter {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            output_dir: config.examples_dir.clone(),
            env: environment()?,
            context: BootstrapContext::new(config),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn render(&self, name: &str) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(&self.context))
            .map_err(template_error(name))
    }

    /// Rendered manifests as `(file name, contents)`
    pub fn manifests(&self) -> Result<Vec<(&'static str, String)>> {
        [AGENT_FILE, ESTIMATOR_FILE]
            .into_iter()
            .map(|name| {
                let manifest = self.render(name)?;
                validate_yaml(name, &manifest)?;
                Ok((name, manifest))
            })
            .collect()
    }

    /// Render and write the manifests, returning the written paths
    #[instrument(skip(self), fields(output_dir = %self.output_dir.display()))]
    pub async fn emit(&self) -> Result<Vec<PathBuf>> {
        let manifests = self.manifests()?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| InstallerError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        let mut written = Vec::with_capacity(manifests.len());
        for (name, manifest) in manifests {
            let path = self.output_dir.join(name);
            debug!("Writing {} bytes to {}", manifest.len(), path.display());
            tokio::fs::write(&path, manifest)
                .await
                .map_err(|source| InstallerError::Io {
                    path: path.clone(),
                    source,
                })?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Operator instructions for joining a member cluster in push or pull mode
    pub fn instructions(&self) -> Result<String> {
        self.render(INSTRUCTIONS)
    }
}
