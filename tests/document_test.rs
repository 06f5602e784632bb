//! Tests for locating hierarchies inside backend documents

use serde_json::json;

use hierflat::application::{locate_hierarchy, ApplicationError};

fn request_record(status: &str, hierarchy: serde_json::Value) -> serde_json::Value {
    json!({
        "requestId": "REQ-20240501-001",
        "config": {"prompt": "running shoes", "country": "KR", "language": "ko"},
        "tasks": {
            "dataCollection": {"status": "success", "data": {"generatedKeywords": []}},
            "hierarchyGeneration": {
                "status": status,
                "progress": 100,
                "logs": [],
                "data": {"hierarchy": hierarchy, "evaluation": null}
            },
            "promptGeneration": {"status": "pending", "data": {"prompts": []}}
        }
    })
}

#[test]
fn given_completed_request_record_when_locating_then_unwraps_llm_result() {
    let node = json!({"name": "Total", "children": [{"name": "Shoes"}]});
    let doc = request_record("success", json!({"hierarchy": node.clone(), "prompts": []}));

    assert_eq!(locate_hierarchy(&doc).unwrap(), &node);
}

#[test]
fn given_running_task_when_locating_then_not_ready() {
    let doc = request_record("running", serde_json::Value::Null);

    let err = locate_hierarchy(&doc).unwrap_err();

    match err {
        ApplicationError::HierarchyNotReady { status } => assert_eq!(status, "running"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_running_task_with_saved_hierarchy_when_locating_then_unwraps_it() {
    let node = json!({"name": "Total", "children": [{"name": "Shoes"}]});
    let doc = request_record("running", json!({"hierarchy": node.clone(), "prompts": []}));

    assert_eq!(locate_hierarchy(&doc).unwrap(), &node);
}

#[test]
fn given_failed_task_with_saved_hierarchy_when_locating_then_not_ready() {
    let doc = request_record("error", json!({"hierarchy": {"name": "Total"}}));

    let err = locate_hierarchy(&doc).unwrap_err();

    match err {
        ApplicationError::HierarchyNotReady { status } => assert_eq!(status, "error"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_raw_llm_output_when_locating_then_unparsed() {
    let doc = request_record("success", json!({"raw": "Sorry, here is your hierarchy: ..."}));

    assert!(matches!(
        locate_hierarchy(&doc),
        Err(ApplicationError::UnparsedHierarchy)
    ));
}

#[test]
fn given_successful_task_without_data_when_locating_then_not_found() {
    let doc = json!({"tasks": {"hierarchyGeneration": {"status": "success", "data": {}}}});

    assert!(matches!(
        locate_hierarchy(&doc),
        Err(ApplicationError::HierarchyNotFound)
    ));
}

#[test]
fn given_unrelated_object_when_locating_then_not_found() {
    let doc = json!({"prompts": ["a", "b"]});

    assert!(matches!(
        locate_hierarchy(&doc),
        Err(ApplicationError::HierarchyNotFound)
    ));
}

#[test]
fn given_root_without_name_when_locating_then_accepts_children_only_node() {
    let doc = json!({"hierarchy": {"children": [{"name": "Tech"}]}});

    assert_eq!(
        locate_hierarchy(&doc).unwrap(),
        &json!({"children": [{"name": "Tech"}]})
    );
}
