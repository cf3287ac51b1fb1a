mod build;
mod render;

use std::path::PathBuf;

use restamp::{Artifact, CONFIG_FILE_NAME, DOCKER_IMPORT_BUILDER_ID, RestampConfig};

pub use build::build;
pub use render::render;

/// Upstream artifact and configuration shared by every command.
#[derive(clap::Args)]
pub struct RequestArgs {
    /// Id of the upstream artifact (the imported image)
    #[arg(long)]
    pub artifact_id: String,
    /// Builder id of the upstream artifact
    #[arg(long, default_value = DOCKER_IMPORT_BUILDER_ID)]
    pub builder_id: String,
    /// Path to the config file
    #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
    /// Set a user variable, overriding [variables] (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

impl RequestArgs {
    /// Load the config, apply `--var` overrides, and build the upstream artifact.
    pub(crate) fn load(&self) -> anyhow::Result<(RestampConfig, Artifact)> {
        let mut config = RestampConfig::load(&self.config)?;
        for raw in &self.vars {
            config.variables.assign(raw)?;
        }
        tracing::debug!(
            config = %self.config.display(),
            variables = config.variables.len(),
            "loaded configuration"
        );

        Ok((config, Artifact::new(&self.builder_id, &self.artifact_id)))
    }
}
