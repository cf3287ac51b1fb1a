use restamp_core::{DynamicValue, Error, RestampConfig};
use tempfile::TempDir;

fn write_config(tmp: &TempDir, content: &str) -> std::path::PathBuf {
    let path = tmp.path().join("restamp.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = RestampConfig::load(&tmp.path().join("restamp.toml")).unwrap();

    assert!(config.variables.is_empty());
    assert!(config.image.is_empty());
    assert!(config.instructions.is_none());
    assert_eq!(config.docker.executable, "docker");
    assert!(config.docker.timeout_secs.is_none());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[variables]
version = "1.2.3"

[image]
expose = ["8212", "1233"]
user = "test-user"
workdir = "/home/test-user"
volume = ["/data", "/logs"]
entrypoint = ["/bin/sh"]
cmd = ["echo", "hello"]

[image.env]
testvar = "TESTVAL"

[docker]
executable = "/usr/local/bin/docker"
timeout_secs = 600
"#,
    );

    let config = RestampConfig::load(&path).unwrap();

    assert_eq!(config.variables.get("version"), Some("1.2.3"));
    assert_eq!(config.image.expose, vec!["8212", "1233"]);
    assert_eq!(config.image.user.as_deref(), Some("test-user"));
    assert_eq!(config.image.workdir.as_deref(), Some("/home/test-user"));
    assert_eq!(config.image.volume, vec!["/data", "/logs"]);
    assert_eq!(config.image.env["testvar"], "TESTVAL");
    assert_eq!(config.image.entrypoint, DynamicValue::from(["/bin/sh"]));
    assert_eq!(config.image.cmd, DynamicValue::from(["echo", "hello"]));
    assert_eq!(config.docker.executable, "/usr/local/bin/docker");
    assert_eq!(config.docker.timeout_secs, Some(600));
}

#[test]
fn load_string_entrypoint_is_single_value() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[image]
entrypoint = "/bin/sh -c"
"#,
    );

    let config = RestampConfig::load(&path).unwrap();

    assert_eq!(config.image.entrypoint, DynamicValue::from("/bin/sh -c"));
    assert_eq!(config.image.cmd, DynamicValue::Absent);
}

#[test]
fn load_rejects_non_string_cmd() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[image]
cmd = 42
"#,
    );

    let err = RestampConfig::load(&path).unwrap_err();

    match err {
        Error::ConfigParse { source, .. } => {
            assert!(
                source
                    .to_string()
                    .contains("not a string or a list of strings"),
                "unexpected message: {source}"
            );
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn load_rejects_list_with_non_string_element() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
[image]
entrypoint = ["/bin/sh", 1]
"#,
    );

    let err = RestampConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, "not valid {{{{ toml");

    let result = RestampConfig::load(&path);
    assert!(result.is_err());

    let err = result.unwrap_err().to_string();
    assert!(err.contains("parse"));
}

#[test]
fn load_empty_config_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, "");

    let config = RestampConfig::load(&path).unwrap();
    assert!(config.image.is_empty());
    assert_eq!(config.docker.executable, "docker");
}

#[test]
fn load_instructions() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
instructions = ["ENV test test", "USER test-user"]
"#,
    );

    let config = RestampConfig::load(&path).unwrap();
    assert_eq!(
        config.instructions.unwrap(),
        vec!["ENV test test", "USER test-user"]
    );
}

#[test]
fn load_rejects_instructions_mixed_with_fields() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
instructions = ["ENV test test"]

[image]
user = "root"
expose = ["80"]
"#,
    );

    let err = RestampConfig::load(&path).unwrap_err();
    match err {
        Error::MixedRecipeModes { fields } => assert_eq!(fields, vec!["expose", "user"]),
        other => panic!("expected MixedRecipeModes, got {other:?}"),
    }
}

#[test]
fn empty_strings_do_not_count_as_active_fields() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        &tmp,
        r#"
instructions = ["USER test-user"]

[image]
user = ""
cmd = []
"#,
    );

    let config = RestampConfig::load(&path).unwrap();
    assert!(config.image.is_empty());
}
