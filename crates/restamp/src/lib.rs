//! Rebuild an imported Docker image with extra Dockerfile directives.
//!
//! This is the facade crate: it re-exports the restamp sub-crates and owns
//! the post-process step that ties them together.
//!
//! ```text
//! Artifact (docker-import)
//!   1. Check      ── builder id must be the docker-import post-processor
//!   2. Render     ── RecipeSource::render()   (structured fields or raw instructions)
//!   3. Build      ── docker build --rm -q -   (recipe on stdin)
//!   4. Parse      ── "Successfully built <id>"
//!   5. Emit       ── Artifact { builder_id: docker-import, id: <id> }
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use restamp::{Artifact, PostProcessor, RestampConfig, DOCKER_IMPORT_BUILDER_ID};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RestampConfig::load(Path::new("restamp.toml"))?;
//! let processor = PostProcessor::new(config)?;
//! let upstream = Artifact::new(DOCKER_IMPORT_BUILDER_ID, "imported-image");
//! let outcome = processor.post_process(&upstream).await?;
//! println!("Built image: {}", outcome.artifact.id());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod error;
pub mod post_process;

pub use artifact::{Artifact, DOCKER_IMPORT_BUILDER_ID, PostProcessOutcome};
pub use error::PostProcessError;
pub use post_process::PostProcessor;

// Core types flattened into root namespace for convenience.
pub use restamp_core::*;

/// Dockerfile recipe generation.
///
/// See [`restamp-build`](https://crates.io/crates/restamp-build) for details.
pub mod build {
    pub use restamp_build::*;
}

/// `docker build` invocation and output parsing.
///
/// See [`restamp-docker`](https://crates.io/crates/restamp-docker) for details.
pub mod docker {
    pub use restamp_docker::*;
}
