//! `docker build` invocation for restamp.
//!
//! The recipe is piped to `docker build --rm -q -` and the image id is
//! recovered from the final `Successfully built <id>` line of its output.

pub mod client;
pub mod docker;
pub mod executor;
pub mod output;

pub use client::{BUILD_ARGS, BuildError, DockerClient};
pub use docker::DockerError;
pub use executor::{BuildResult, DockerExecutor, RealExecutor};
pub use output::{ImageId, OutputParseError, extract_image_id};
