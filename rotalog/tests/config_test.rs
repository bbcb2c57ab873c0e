use rotalog::{
    ConfigError, FileWriteMode, JsonIndent, LoggerConfig, RotateSize, SizeUnit, WriteMode,
};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_load_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(
        &path,
        r#"
dir_path = "var/logs"
file_name = "app"
file_ext = "txt"
error_file = "errors"
debug_write_mode = "console"
use_milliseconds = false
show_pid = true
json_indent = 2
colored_file_output = false
max_console_length = 120
file_write_mode = "non-blocking"

[rotate_file]
size = 5
unit = "K"
"#,
    )
    .unwrap();

    let config = LoggerConfig::load(&path).unwrap();

    assert_eq!(config.dir_path, PathBuf::from("var/logs"));
    assert_eq!(config.file_name, "app");
    assert_eq!(config.file_ext, "txt");
    assert_eq!(config.error_file, Some(PathBuf::from("errors")));
    assert_eq!(config.debug_write_mode, WriteMode::Console);
    assert!(!config.use_milliseconds);
    assert!(config.show_pid);
    assert_eq!(config.json_indent, Some(JsonIndent::Spaces(2)));
    assert!(!config.colored_file_output);
    assert_eq!(config.max_console_length, Some(120));
    assert_eq!(config.file_write_mode, FileWriteMode::NonBlocking);
    assert_eq!(config.rotate_file, RotateSize::new(5, SizeUnit::K));
    assert_eq!(config.max_bytes(), 5 * 1024);
}

#[test]
fn test_load_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.json");
    fs::write(&path, r#"{ "show_pid": true }"#).unwrap();

    let config = LoggerConfig::load(&path).unwrap();

    assert!(config.show_pid);
    assert_eq!(config.file_name, "log");
    assert_eq!(config.file_ext, "ansi");
    assert_eq!(config.debug_write_mode, WriteMode::ConsoleAndFile);
    assert_eq!(config.max_bytes(), 10 * 1024 * 1024);
    assert!(config.use_milliseconds);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = LoggerConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Load { .. })));
}

#[test]
fn test_load_rejects_bad_write_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(&path, "debug_write_mode = \"everywhere\"\n").unwrap();

    assert!(matches!(
        LoggerConfig::load(&path),
        Err(ConfigError::Load { .. })
    ));
}

#[test]
fn test_builder_chain() {
    let config = LoggerConfig::new("logs")
        .with_file_name("svc")
        .with_rotation(100, SizeUnit::B)
        .with_debug_write_mode(WriteMode::None)
        .with_milliseconds(false)
        .with_json_indent(JsonIndent::Text("\t".to_string()))
        .with_max_console_length(80);

    assert_eq!(config.file_name, "svc");
    assert_eq!(config.max_bytes(), 100);
    assert_eq!(config.debug_write_mode, WriteMode::None);
    assert!(!config.use_milliseconds);
    assert_eq!(config.max_console_length, Some(80));

    let location = config.primary_location().unwrap();
    assert_eq!(location.path_for(2), PathBuf::from("logs").join("svc.2.ansi"));
}

#[test]
fn test_error_file_with_own_directory() {
    let config = LoggerConfig::new("logs").with_error_file("errs/failures.err");
    let location = config.error_location().unwrap().unwrap();

    assert_eq!(location.dir, PathBuf::from("errs"));
    assert_eq!(location.name, "failures");
    assert_eq!(location.ext, "err");
}
