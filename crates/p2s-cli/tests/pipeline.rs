//! Integration tests for the conversion pipeline.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow_ipc::convert::schema_to_fb;
use arrow_schema::{DataType, Field, Schema};
use base64::{Engine as _, engine::general_purpose};

use p2s_cli::pipeline::{RunSummary, convert_profile, run_conversion};
use p2s_model::{DatasetProfile, ProfileDocument, ProjectedSchema};
use p2s_output::{OutputError, SchemaSink};

/// Sink that records what it receives and can be told to fail for one name.
#[derive(Default)]
struct RecordingSink {
    emitted: Vec<(String, ProjectedSchema)>,
    fail_for: Option<String>,
}

impl SchemaSink for RecordingSink {
    fn emit(&mut self, name: &str, schema: &ProjectedSchema) -> p2s_output::Result<()> {
        if self.fail_for.as_deref() == Some(name) {
            return Err(OutputError::Write {
                dataset: name.to_string(),
                target: "memory".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.emitted.push((name.to_string(), schema.clone()));
        Ok(())
    }
}

fn id_name_schema() -> String {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int32, true),
        Field::new("name", DataType::Utf8, true),
    ]);
    general_purpose::STANDARD.encode(schema_to_fb(&schema).finished_data())
}

fn nested_schema() -> String {
    let schema = Schema::new(vec![Field::new(
        "events",
        DataType::LargeList(Arc::new(Field::new("item", DataType::Date64, true))),
        true,
    )]);
    general_purpose::STANDARD.encode(schema_to_fb(&schema).finished_data())
}

fn write_profile(dir: &Path, document: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("profile.json");
    fs::write(&path, serde_json::to_string(document).expect("serialize")).expect("write");
    path
}

#[test]
fn emits_id_and_name_fields_in_order() {
    let document = ProfileDocument::new(vec![DatasetProfile::with_schema("t1", id_name_schema())]);
    let mut sink = RecordingSink::default();
    let summary = convert_profile(&document, &mut sink).expect("convert");

    assert_eq!(summary.emitted, 1);
    let (name, schema) = &sink.emitted[0];
    assert_eq!(name, "t1");
    insta::assert_json_snapshot!(schema, @r#"
    {
      "fields": [
        {
          "name": "id",
          "class": "INT",
          "signed": true,
          "bitWidth": 32
        },
        {
          "name": "name",
          "class": "UTF8"
        }
      ]
    }
    "#);
}

#[test]
fn datasets_without_schema_are_skipped() {
    let document = ProfileDocument::new(vec![
        DatasetProfile {
            dataset_path: Some("no_schema".to_string()),
            ..DatasetProfile::default()
        },
        DatasetProfile::with_schema("t1", id_name_schema()),
    ]);
    let mut sink = RecordingSink::default();
    let summary = convert_profile(&document, &mut sink).expect("convert");
    assert_eq!(
        summary,
        RunSummary {
            datasets: 2,
            emitted: 1,
            skipped: 1,
            failed_outputs: 0,
        }
    );
    assert_eq!(sink.emitted.len(), 1);
    assert_eq!(sink.emitted[0].0, "t1");
}

#[test]
fn empty_profile_emits_nothing() {
    let mut sink = RecordingSink::default();
    let summary = convert_profile(&ProfileDocument::default(), &mut sink).expect("convert");
    assert_eq!(summary, RunSummary::default());
    assert!(sink.emitted.is_empty());
}

#[test]
fn output_failure_does_not_stop_the_run() {
    let document = ProfileDocument::new(vec![
        DatasetProfile::with_schema("first", id_name_schema()),
        DatasetProfile::with_schema("second", nested_schema()),
    ]);
    let mut sink = RecordingSink {
        fail_for: Some("first".to_string()),
        ..RecordingSink::default()
    };
    let summary = convert_profile(&document, &mut sink).expect("convert");
    assert_eq!(summary.failed_outputs, 1);
    assert_eq!(summary.emitted, 1);
    assert_eq!(sink.emitted[0].0, "second");
    assert_eq!(
        serde_json::to_value(&sink.emitted[0].1).expect("serialize"),
        serde_json::json!({
            "fields": [{
                "name": "events",
                "class": "LARGE_LIST",
                "nestedTypes": [{"name": "item", "class": "DATE", "dateUnit": "MILLISECOND"}]
            }]
        })
    );
}

#[test]
fn malformed_schema_aborts_with_dataset_name() {
    let document = ProfileDocument::new(vec![
        DatasetProfile::with_schema("good", id_name_schema()),
        DatasetProfile::with_schema("space.broken", "@@not-base64@@"),
        DatasetProfile::with_schema("never", id_name_schema()),
    ]);
    let mut sink = RecordingSink::default();
    let err = convert_profile(&document, &mut sink).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("space.broken"), "message: {message}");
    assert!(message.contains("decode"), "message: {message}");
    assert_eq!(sink.emitted.len(), 1);
}

#[test]
fn writes_one_file_per_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_profile(
        dir.path(),
        &serde_json::json!({
            "datasetProfile": [
                {"datasetPath": "a/b c:d", "batchSchema": id_name_schema()},
                {"datasetPath": "ignored", "batchSchema": null},
                {"datasetPath": "\"space\".\"events\"", "batchSchema": nested_schema()}
            ]
        }),
    );
    let out_dir = dir.path().join("schemas");
    let summary = run_conversion(&input, Some(&out_dir)).expect("run");
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.skipped, 1);

    let mut files: Vec<String> = fs::read_dir(&out_dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["_space_._events_.json", "a_b_c_d.json"]);

    let written: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out_dir.join("a_b_c_d.json")).expect("read schema"),
    )
    .expect("parse schema");
    assert_eq!(written["fields"][0]["bitWidth"], 32);
    assert_eq!(written["fields"][1]["name"], "name");
}

#[test]
fn empty_dataset_list_writes_no_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_profile(dir.path(), &serde_json::json!({"datasetProfile": []}));
    let out_dir = dir.path().join("schemas");
    let summary = run_conversion(&input, Some(&out_dir)).expect("run");
    assert_eq!(summary.datasets, 0);
    assert_eq!(fs::read_dir(&out_dir).expect("read dir").count(), 0);
}

#[test]
fn missing_input_fails_before_output_is_prepared() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_dir = dir.path().join("schemas");
    let err = run_conversion(&dir.path().join("absent.json"), Some(&out_dir)).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
    assert!(!out_dir.exists());
}
