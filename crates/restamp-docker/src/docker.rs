#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("failed to start {executable} — is docker installed and on PATH?")]
    Spawn {
        executable: String,
        source: std::io::Error,
    },

    #[error("docker command failed ({}): {args:?}\n{stderr}", describe_exit(*exit_code))]
    CommandFailed {
        args: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("docker output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("failed to write to docker stdin")]
    StdinWrite { source: std::io::Error },

    #[error("failed waiting for docker to exit")]
    Wait { source: std::io::Error },

    #[error("docker build did not finish within {limit:?} and was killed")]
    Timeout { limit: std::time::Duration },
}

impl DockerError {
    /// Captured stderr, when the process ran far enough to produce one.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}
