use restamp_build::RecipeError;
use restamp_docker::BuildError;

#[derive(Debug, thiserror::Error)]
pub enum PostProcessError {
    #[error(
        "unknown artifact type: {builder_id}\ncan only restamp artifacts from {expected}"
    )]
    UnrecognizedArtifact {
        builder_id: String,
        expected: &'static str,
    },

    #[error("invalid configuration")]
    Config(#[from] restamp_core::Error),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Build(#[from] BuildError),
}
