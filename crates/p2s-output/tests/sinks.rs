//! Tests for the directory and stream sinks.

use std::fs;

use p2s_model::{FieldDefinition, Metadata, ProjectedSchema, ProjectedType};
use p2s_output::{DirectorySink, OutputError, SchemaSink, StdoutSink, open_sink};

fn sample_schema() -> ProjectedSchema {
    ProjectedSchema {
        fields: vec![
            FieldDefinition {
                name: "id".to_string(),
                data_type: ProjectedType::Int {
                    signed: true,
                    bit_width: 32,
                },
                metadata: Metadata::new(),
            },
            FieldDefinition {
                name: "name".to_string(),
                data_type: ProjectedType::Utf8,
                metadata: Metadata::new(),
            },
        ],
        metadata: Metadata::new(),
    }
}

#[test]
fn directory_sink_creates_missing_directories() {
    let root = tempfile::tempdir().expect("tempdir");
    let dir = root.path().join("nested").join("schemas");
    let sink = DirectorySink::create(&dir).expect("create sink");
    assert!(dir.is_dir());
    assert_eq!(sink.dir(), dir.as_path());
}

#[test]
fn directory_sink_writes_sanitized_file_names() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::create(root.path()).expect("create sink");
    sink.emit("a/b c:d", &sample_schema()).expect("emit");

    let path = root.path().join("a_b_c_d.json");
    assert!(path.is_file());
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(
        value,
        serde_json::json!({
            "fields": [
                {"name": "id", "class": "INT", "signed": true, "bitWidth": 32},
                {"name": "name", "class": "UTF8"}
            ]
        })
    );
}

#[test]
fn directory_sink_on_a_file_path_fails() {
    let root = tempfile::tempdir().expect("tempdir");
    let file = root.path().join("occupied");
    fs::write(&file, "x").expect("write");
    let err = DirectorySink::create(&file).unwrap_err();
    assert!(matches!(err, OutputError::CreateDir { .. }));
}

#[test]
fn write_failure_is_reported_per_dataset() {
    let root = tempfile::tempdir().expect("tempdir");
    let mut sink = DirectorySink::create(root.path()).expect("create sink");
    // A directory occupying the target file name makes the write fail.
    fs::create_dir(root.path().join("blocked.json")).expect("mkdir");

    let err = sink.emit("blocked", &sample_schema()).unwrap_err();
    match err {
        OutputError::Write { dataset, .. } => assert_eq!(dataset, "blocked"),
        other => panic!("unexpected error: {other}"),
    }
    sink.emit("free", &sample_schema()).expect("next dataset still written");
    assert!(root.path().join("free.json").is_file());
}

#[test]
fn stream_sink_escapes_dataset_names() {
    let mut sink = StdoutSink::new(Vec::new());
    sink.emit("say \"hi\"", &sample_schema()).expect("emit");
    let out = String::from_utf8(sink.into_inner()).expect("utf8");
    let (key, body) = out.split_once(':').expect("separator");
    assert_eq!(key, "\"say \\\"hi\\\"\"");
    let value: serde_json::Value = serde_json::from_str(body).expect("parse body");
    assert_eq!(value["fields"][1]["class"], "UTF8");
}

#[test]
fn open_sink_without_directory_streams() {
    assert!(open_sink(None).is_ok());
}

#[test]
fn open_sink_with_directory_creates_it() {
    let root = tempfile::tempdir().expect("tempdir");
    let dir = root.path().join("out");
    let mut sink = open_sink(Some(&dir)).expect("open sink");
    sink.emit("t1", &sample_schema()).expect("emit");
    assert!(dir.join("t1.json").is_file());
}
