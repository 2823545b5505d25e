//! Integration tests for stamper-input.
//!
//! These exercise the data argument classification together with the readers,
//! using mocks so the results do not depend on how the test runner wires stdin.

use std::path::PathBuf;

use stamper_input::{
    read_file, read_stdin, DataArg, EnvReader, InputError, MockEnv, MockStdin,
};

#[test]
fn dash_reads_piped_stdin() {
    let arg = DataArg::from_arg(Some("-"));
    assert!(arg.is_stdin());

    let text = read_stdin(&MockStdin::piped("name=value\n")).unwrap();
    assert_eq!(text, "name=value\n");
}

#[test]
fn interactive_stdin_is_not_a_stream() {
    let result = read_stdin(&MockStdin::terminal());
    assert!(matches!(result, Err(InputError::NoInputSupplied)));
}

#[test]
fn path_argument_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"foo": "bar"}"#).unwrap();

    let arg = DataArg::from_arg(Some(path.as_os_str()));
    assert_eq!(arg.suffix().as_deref(), Some(".json"));
    assert_eq!(read_file(arg.path().unwrap()).unwrap(), r#"{"foo": "bar"}"#);
}

#[test]
fn missing_file_is_reported_with_path() {
    let path = PathBuf::from("definitely/not/here.yaml");
    let err = read_file(&path).unwrap_err();
    assert!(err.to_string().contains("here.yaml"));
}

#[test]
fn unicode_file_contents_survive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.env");
    std::fs::write(&path, "name=Jürgen\n").unwrap();
    assert_eq!(read_file(&path).unwrap(), "name=Jürgen\n");
}

#[test]
fn mock_env_snapshot_is_ordered() {
    let env = MockEnv::new().with_var("B", "2").with_var("A", "1");
    let keys: Vec<_> = env.vars().into_keys().collect();
    assert_eq!(keys, vec!["A", "B"]);
}
