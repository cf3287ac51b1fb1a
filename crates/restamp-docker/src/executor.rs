use std::process::Stdio;
use std::time::Duration;

use restamp_core::DockerConfig;
use tokio::io::AsyncWriteExt;

use crate::docker::DockerError;

/// Captured output of a docker invocation that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildResult {
    pub stdout: String,
    pub stderr: String,
}

/// Abstraction over docker CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait DockerExecutor: Send + Sync {
    /// Execute a docker command with data piped to stdin, capturing stdout
    /// and stderr separately. A non-zero exit is an error.
    async fn exec_with_stdin(
        &self,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<BuildResult, DockerError>;
}

/// Real docker CLI executor.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    executable: String,
    timeout: Option<Duration>,
}

impl RealExecutor {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &DockerConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Kill the process if it has not exited after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    async fn run(&self, args: &[String], stdin_data: &[u8]) -> Result<BuildResult, DockerError> {
        let mut child = tokio::process::Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DockerError::Spawn {
                executable: self.executable.clone(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(stdin_data)
                .await
                .map_err(|e| DockerError::StdinWrite { source: e })?;
            stdin
                .shutdown()
                .await
                .map_err(|e| DockerError::StdinWrite { source: e })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DockerError::Wait { source: e })?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if output.status.success() {
            let stdout = String::from_utf8(output.stdout)
                .map_err(|e| DockerError::InvalidUtf8 { source: e })?;
            Ok(BuildResult { stdout, stderr })
        } else {
            Err(DockerError::CommandFailed {
                args: args.to_vec(),
                exit_code: output.status.code(),
                stderr,
            })
        }
    }
}

impl Default for RealExecutor {
    fn default() -> Self {
        Self::from_config(&DockerConfig::default())
    }
}

impl DockerExecutor for RealExecutor {
    async fn exec_with_stdin(
        &self,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<BuildResult, DockerError> {
        match self.timeout {
            // Dropping the timed-out future drops the child, which kills it.
            Some(limit) => tokio::time::timeout(limit, self.run(args, stdin_data))
                .await
                .map_err(|elapsed| {
                    tracing::warn!(
                        %elapsed,
                        executable = %self.executable,
                        "docker build timed out"
                    );
                    DockerError::Timeout { limit }
                })?,
            None => self.run(args, stdin_data).await,
        }
    }
}
