use mockall::mock;
use restamp_docker::{
    BUILD_ARGS, BuildError, BuildResult, DockerClient, DockerError, DockerExecutor, RealExecutor,
};

mock! {
    Executor {}

    impl DockerExecutor for Executor {
        async fn exec_with_stdin(
            &self,
            args: &[String],
            stdin_data: &[u8],
        ) -> Result<BuildResult, DockerError>;
    }
}

fn stdout(text: &str) -> BuildResult {
    BuildResult {
        stdout: text.to_owned(),
        stderr: String::new(),
    }
}

// ── Build Tests ──

#[tokio::test]
async fn build_pipes_recipe_and_returns_image_id() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_with_stdin()
        .withf(|args, data| args == BUILD_ARGS.as_slice() && data == b"FROM test-id\n")
        .times(1)
        .returning(|_, _| {
            Ok(stdout(
                "Step 1/1 : FROM test-id\n ---> 5f2e\nSuccessfully built 5f2e7c1a\n",
            ))
        });

    let client = DockerClient::with_executor(mock);
    let image_id = client.build("FROM test-id\n").await.unwrap();

    assert_eq!(image_id.as_str(), "5f2e7c1a");
}

#[tokio::test]
async fn build_process_failure_carries_stderr() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_with_stdin().returning(|args, _| {
        Err(DockerError::CommandFailed {
            args: args.to_vec(),
            exit_code: Some(1),
            stderr: "Cannot connect to the Docker daemon".to_owned(),
        })
    });

    let client = DockerClient::with_executor(mock);
    let err = client.build("FROM test-id\n").await.unwrap_err();

    match err {
        BuildError::Process { source } => {
            assert_eq!(source.stderr(), Some("Cannot connect to the Docker daemon"));
        }
        other => panic!("expected Process error, got {other:?}"),
    }
}

#[tokio::test]
async fn build_unparseable_output_is_parse_error() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_with_stdin()
        .returning(|_, _| Ok(stdout("sha256:0123abcd\n")));

    let client = DockerClient::with_executor(mock);
    let err = client.build("FROM test-id\n").await.unwrap_err();

    assert!(matches!(err, BuildError::Parse(_)));
    assert!(err.to_string().contains("Successfully built"));
}

#[test]
fn build_args_read_recipe_from_stdin() {
    assert_eq!(BUILD_ARGS, ["build", "--rm", "-q", "-"]);
}

// ── Real Executor Tests ──

#[cfg(unix)]
fn sh(script: &str) -> Vec<String> {
    vec!["-c".to_owned(), script.to_owned()]
}

#[cfg(unix)]
#[tokio::test]
async fn real_executor_pipes_stdin_and_captures_streams() {
    let executor = RealExecutor::new("sh");

    let result = executor
        .exec_with_stdin(&sh("cat; echo warn >&2"), b"FROM test-id\n")
        .await
        .unwrap();

    assert_eq!(result.stdout, "FROM test-id\n");
    assert_eq!(result.stderr, "warn\n");
}

#[cfg(unix)]
#[tokio::test]
async fn real_executor_non_zero_exit_is_command_failed() {
    let executor = RealExecutor::new("sh");

    let err = executor
        .exec_with_stdin(&sh("echo boom >&2; exit 3"), b"")
        .await
        .unwrap_err();

    match err {
        DockerError::CommandFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, Some(3));
            assert_eq!(stderr, "boom\n");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn real_executor_missing_binary_is_spawn_error() {
    let executor = RealExecutor::new("/nonexistent/restamp-docker-binary");

    let err = executor
        .exec_with_stdin(&["build".to_owned()], b"FROM x\n")
        .await
        .unwrap_err();

    assert!(matches!(err, DockerError::Spawn { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn real_executor_times_out() {
    let executor = RealExecutor::new("sh").with_timeout(std::time::Duration::from_millis(200));

    let err = executor
        .exec_with_stdin(&sh("sleep 5"), b"")
        .await
        .unwrap_err();

    match &err {
        DockerError::Timeout { limit } => {
            assert_eq!(*limit, std::time::Duration::from_millis(200));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(err.to_string().contains("within 200ms"), "{err}");
}
