//! Tests for ExportService

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, TimeZone};
use tempfile::TempDir;

use hierflat::application::services::{ExportService, ExportTarget};
use hierflat::application::ApplicationError;
use hierflat::config::ExportConfig;
use hierflat::domain::{DomainError, ValidationMode, BOM};
use hierflat::infrastructure::traits::{FileSystem, RealFileSystem};
use hierflat::util::testing;

const LLM_RESULT: &str = r#"{
  "hierarchy": {
    "name": "Total",
    "value": 100,
    "children": [
      {"name": "Tech", "value": 60, "children": [{"name": "AI", "value": 40}]},
      {"name": "Fashion", "value": 40}
    ]
  },
  "prompts": [{"prompt": "best ai tools"}]
}"#;

fn service(config: ExportConfig) -> ExportService {
    testing::init_test_setup();
    ExportService::new(Arc::new(RealFileSystem), config, ValidationMode::Strict)
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write input");
    path
}

#[test]
fn given_llm_result_file_when_loading_then_returns_hierarchy() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, "result.json", LLM_RESULT);

    // Act
    let root = service(ExportConfig::default()).load(&input).unwrap();

    // Assert
    assert_eq!(root.name, "Total");
    assert_eq!(root.value, 100.0);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn given_hierarchy_when_rendering_then_returns_csv_without_bom() {
    let svc = service(ExportConfig::default());
    let root = svc.parse(LLM_RESULT).unwrap();

    let csv = svc.render(&root);

    assert_eq!(csv, "Depth1,Depth2,Depth3\nTech,AI,\nFashion,,");
    assert_eq!(svc.row_count(&root), 2);
}

#[test]
fn given_timestamp_when_naming_export_then_uses_prefix_date_and_time() {
    let svc = service(ExportConfig::default());
    let now = Local.with_ymd_and_hms(2024, 5, 1, 13, 45, 9).unwrap();

    assert_eq!(
        svc.export_file_name(now),
        "industry-analysis-2024-05-01-13-45-09.csv"
    );
}

#[test]
fn given_directory_target_when_exporting_then_writes_named_file_with_bom() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("exports");
    let svc = service(ExportConfig::default());
    let root = svc.parse(LLM_RESULT).unwrap();
    let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

    // Act
    let path = svc
        .export_at(&root, ExportTarget::Directory(out_dir.clone()), now)
        .unwrap();

    // Assert
    assert_eq!(path, out_dir.join("industry-analysis-2024-05-01-09-00-00.csv"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(BOM));
    assert_eq!(
        content.trim_start_matches(BOM),
        "Depth1,Depth2,Depth3\nTech,AI,\nFashion,,"
    );
}

#[test]
fn given_bom_disabled_when_exporting_to_file_then_writes_plain_csv() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("out.csv");
    let config = ExportConfig {
        bom: false,
        ..ExportConfig::default()
    };
    let svc = service(config);
    let root = svc.parse(r#"{"name": "Total"}"#).unwrap();

    // Act
    let path = svc.export(&root, ExportTarget::File(target.clone())).unwrap();

    // Assert
    assert_eq!(path, target);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "Depth1,Depth2,Depth3"
    );
}

#[test]
fn given_custom_prefix_when_using_default_target_then_writes_to_configured_dir() {
    let temp = TempDir::new().unwrap();
    let config = ExportConfig {
        output_dir: temp.path().to_path_buf(),
        file_prefix: "topics".to_string(),
        bom: true,
    };
    let svc = service(config);
    let root = svc.parse(LLM_RESULT).unwrap();

    let path = svc.export(&root, svc.default_target()).unwrap();

    assert_eq!(path.parent(), Some(temp.path()));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("topics-"), "{}", name);
    assert!(name.ends_with(".csv"), "{}", name);
}

#[test]
fn given_missing_input_when_loading_then_operation_failed() {
    let temp = TempDir::new().unwrap();

    let err = service(ExportConfig::default())
        .load(&temp.path().join("missing.json"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn given_invalid_json_when_parsing_then_json_error() {
    let err = service(ExportConfig::default())
        .parse("{not json")
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Json(_)));
}

#[test]
fn given_node_without_name_when_strict_then_domain_error() {
    let err = service(ExportConfig::default())
        .parse(r#"{"hierarchy": {"name": "Total", "children": [{"children": []}]}}"#)
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MissingName { .. })
    ));
}

#[test]
fn given_non_list_children_when_strict_then_invalid_children_error() {
    let err = service(ExportConfig::default())
        .parse(r#"{"name": "T", "children": [{"name": "a", "children": "oops"}]}"#)
        .unwrap_err();

    match err {
        ApplicationError::Domain(DomainError::InvalidChildren { path }) => {
            assert_eq!(path, "/children/0")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_node_without_name_when_lenient_then_exports_empty_cell() {
    let svc = ExportService::new(
        Arc::new(RealFileSystem),
        ExportConfig::default(),
        ValidationMode::Lenient,
    );

    let root = svc
        .parse(r#"{"name": "Total", "children": [{"children": "oops"}]}"#)
        .unwrap();

    assert_eq!(svc.render(&root), "Depth1,Depth2,Depth3\n,,");
}

// ============================================================
// Failure propagation
// ============================================================

/// Filesystem whose writes always fail.
struct ReadOnlyFileSystem;

impl FileSystem for ReadOnlyFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn is_dir(&self, _path: &Path) -> bool {
        true
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn given_failing_write_when_exporting_then_error_propagates_with_path() {
    let svc = ExportService::new(
        Arc::new(ReadOnlyFileSystem),
        ExportConfig::default(),
        ValidationMode::Strict,
    );
    let root = svc.parse(LLM_RESULT).unwrap();

    let err = svc
        .export(&root, ExportTarget::File(PathBuf::from("/nowhere/out.csv")))
        .unwrap_err();

    match err {
        ApplicationError::OperationFailed { context, source } => {
            assert_eq!(context, "write export: /nowhere/out.csv");
            assert_eq!(source.to_string(), "read-only");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
