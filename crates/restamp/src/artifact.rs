use serde::{Deserialize, Serialize};

/// Builder id of artifacts produced by the docker-import post-processor.
/// Only these are accepted, and restamped artifacts carry the same id.
pub const DOCKER_IMPORT_BUILDER_ID: &str = "packer.post-processor.docker-import";

/// A build artifact handed between pipeline steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    builder_id: String,
    id: String,
}

impl Artifact {
    pub fn new(builder_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            builder_id: builder_id.into(),
            id: id.into(),
        }
    }

    /// Identifier of the step that produced this artifact.
    pub fn builder_id(&self) -> &str {
        &self.builder_id
    }

    /// Image id (or repository reference) the artifact points at.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_docker_import(&self) -> bool {
        self.builder_id == DOCKER_IMPORT_BUILDER_ID
    }
}

/// Result of a successful post-process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostProcessOutcome {
    pub artifact: Artifact,
    /// Whether the upstream artifact should be kept. Always `true`: the
    /// imported image stays the base of the new one.
    pub keep: bool,
}
