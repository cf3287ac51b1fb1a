use restamp_core::DockerConfig;

use crate::docker::DockerError;
use crate::executor::{DockerExecutor, RealExecutor};
use crate::output::{ImageId, OutputParseError, extract_image_id};

/// `docker build` reading the Dockerfile from stdin, quiet, removing
/// intermediate containers.
pub const BUILD_ARGS: [&str; 4] = ["build", "--rm", "-q", "-"];

/// docker operations client, parameterized over the executor for testability.
pub struct DockerClient<E: DockerExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::default(),
        }
    }

    pub fn from_config(config: &DockerConfig) -> Self {
        Self {
            executor: RealExecutor::from_config(config),
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DockerExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Build an image from `recipe` and return its id.
    ///
    /// Blocks until docker exits. Nothing is retried.
    pub async fn build(&self, recipe: &str) -> Result<ImageId, BuildError> {
        let args: Vec<String> = BUILD_ARGS.iter().map(|s| (*s).to_owned()).collect();

        let result = self
            .executor
            .exec_with_stdin(&args, recipe.as_bytes())
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    stderr = e.stderr().unwrap_or_default(),
                    "docker build failed"
                );
                BuildError::Process { source: e }
            })?;

        tracing::debug!(stdout = %result.stdout, "docker build output");

        let image_id = extract_image_id(&result.stdout)?;
        tracing::info!(image_id = %image_id, "docker build succeeded");
        Ok(image_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("docker build failed: {source}")]
    Process { source: DockerError },

    #[error(transparent)]
    Parse(#[from] OutputParseError),
}
