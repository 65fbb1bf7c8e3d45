use livesync_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    name: String,
    #[serde(default)]
    count: u32,
}

fn write(temp: &TempDir, file: &str, content: &str) -> NormalizedPath {
    let path = temp.path().join(file);
    std::fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "sample.toml", "name = \"app\"\ncount = 3\n");

    let loaded: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(
        loaded,
        Sample {
            name: "app".into(),
            count: 3
        }
    );
}

#[test]
fn test_load_json_and_yaml_agree() {
    let temp = TempDir::new().unwrap();
    let json = write(&temp, "sample.json", r#"{"name": "app"}"#);
    let yaml = write(&temp, "sample.yml", "name: app\n");

    let store = ConfigStore::new();
    let from_json: Sample = store.load(&json).unwrap();
    let from_yaml: Sample = store.load(&yaml).unwrap();
    assert_eq!(from_json, from_yaml);
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "sample.ini", "name=app");

    let result: livesync_fs::Result<Sample> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_load_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "broken.toml", "name = ");

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    assert!(err.to_string().contains("TOML"), "got: {err}");
}
