use restamp_build::{RecipeGenerator, RecipeSource, RenderedRecipe};
use restamp_core::{RestampConfig, TypeDispatcher};
use restamp_docker::{DockerClient, DockerExecutor, RealExecutor};

use crate::artifact::{Artifact, DOCKER_IMPORT_BUILDER_ID, PostProcessOutcome};
use crate::error::PostProcessError;

/// Turns a docker-import artifact into a rebuilt image.
///
/// Generic over the executor so tests can substitute a mock for docker.
pub struct PostProcessor<E: DockerExecutor = RealExecutor> {
    config: RestampConfig,
    client: DockerClient<E>,
}

impl PostProcessor<RealExecutor> {
    pub fn new(config: RestampConfig) -> Result<Self, PostProcessError> {
        let client = DockerClient::from_config(&config.docker);
        Self::with_client(config, client)
    }
}

impl<E: DockerExecutor> PostProcessor<E> {
    pub fn with_client(
        config: RestampConfig,
        client: DockerClient<E>,
    ) -> Result<Self, PostProcessError> {
        config.validate()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RestampConfig {
        &self.config
    }

    /// Render the recipe for `artifact` without building it.
    pub fn render(&self, artifact: &Artifact) -> Result<RenderedRecipe, PostProcessError> {
        ensure_docker_import(artifact)?;

        let dispatcher = TypeDispatcher::new(&self.config.variables);
        let recipe = RecipeSource::from_config(&self.config).render(artifact.id(), &dispatcher)?;
        tracing::debug!(dockerfile = %recipe, "rendered Dockerfile");
        Ok(recipe)
    }

    /// Render, build, and return the artifact for the new image.
    ///
    /// Any failure aborts before an artifact is produced; a recipe that
    /// fails to render is never sent to docker.
    pub async fn post_process(
        &self,
        artifact: &Artifact,
    ) -> Result<PostProcessOutcome, PostProcessError> {
        let recipe = self.render(artifact)?;
        let image_id = self.client.build(recipe.as_str()).await?;

        tracing::info!("Built image: {image_id}");
        let artifact = Artifact::new(DOCKER_IMPORT_BUILDER_ID, image_id.into_string());
        tracing::debug!(?artifact, "restamped artifact");

        Ok(PostProcessOutcome {
            artifact,
            keep: true,
        })
    }
}

fn ensure_docker_import(artifact: &Artifact) -> Result<(), PostProcessError> {
    if artifact.is_docker_import() {
        Ok(())
    } else {
        Err(PostProcessError::UnrecognizedArtifact {
            builder_id: artifact.builder_id().to_owned(),
            expected: DOCKER_IMPORT_BUILDER_ID,
        })
    }
}
